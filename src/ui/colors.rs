use crate::provider::Branch;
use ratatui::style::Color;

pub struct ColorPalette {
    pub primary: Color,
    pub accent: Color,
    pub error: Color,
    pub selected_bg: Color,
    pub selected_fg: Color,
}

impl ColorPalette {
    pub fn for_branch(branch: Branch) -> Self {
        match branch {
            Branch::OpenAi => Self::openai(),
            Branch::OpenRouter => Self::openrouter(),
        }
    }

    fn openai() -> Self {
        Self {
            // Cool blue
            primary: Color::Cyan,
            // Green accent
            accent: Color::Green,
            // Red for errors
            error: Color::Red,
            selected_bg: Color::Cyan,
            selected_fg: Color::Black,
        }
    }

    fn openrouter() -> Self {
        Self {
            // Violet
            primary: Color::Rgb(0x9B, 0x59, 0xB6),
            // Sky blue accent
            accent: Color::Rgb(0x34, 0x98, 0xDB),
            error: Color::Rgb(0xE7, 0x4C, 0x3C),
            selected_bg: Color::Rgb(0x9B, 0x59, 0xB6),
            selected_fg: Color::White,
        }
    }
}
