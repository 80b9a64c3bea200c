use crate::app::{App, EditorField, RangeEditor};
use crate::provider::Branch;
use crate::ui::colors::ColorPalette;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    let area = f.size();
    let palette = ColorPalette::for_branch(Branch::OpenAi);

    if let Some(editor) = &app.editor {
        render_range_editor(f, area, editor, &palette);
    } else if app.is_loading() && app.has_any_data() {
        render_loading_popup(f, area, &palette);
    }
}

fn create_centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn create_popup_block(title: &str, primary_color: Color) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(primary_color))
        .title(title.to_string())
        .title_style(
            Style::default()
                .fg(primary_color)
                .add_modifier(Modifier::BOLD),
        )
}

fn render_loading_popup(f: &mut Frame, area: Rect, palette: &ColorPalette) {
    let popup_area = create_centered_popup(area, 40, 5);
    let block = create_popup_block(" Loading ", palette.primary);
    let inner = block.inner(popup_area);

    f.render_widget(block, popup_area);
    f.render_widget(
        Paragraph::new("Fetching usage data...")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White)),
        inner,
    );
}

fn render_range_editor(f: &mut Frame, area: Rect, editor: &RangeEditor, palette: &ColorPalette) {
    let popup_area = create_centered_popup(area, 60, 10);
    let block = create_popup_block(" Edit range ", palette.primary);
    let inner = block.inner(popup_area);

    f.render_widget(block, popup_area);
    f.render_widget(
        Paragraph::new(vec![
            Line::from(""),
            field_line("Start", &editor.start_input, editor.field == EditorField::Start, palette),
            Line::from(""),
            field_line("End", &editor.end_input, editor.field == EditorField::End, palette),
            Line::from(""),
            match &editor.message {
                Some(message) => Line::from(Span::styled(
                    message.clone(),
                    Style::default().fg(palette.error),
                )),
                None => Line::from(Span::styled(
                    "Dates are YYYY-MM-DD, interpreted as UTC",
                    Style::default().fg(Color::Gray),
                )),
            },
            Line::from(""),
            Line::from(Span::styled(
                "Tab to switch field, Enter to apply, Esc to cancel",
                Style::default().fg(palette.primary),
            )),
        ])
        .alignment(Alignment::Left),
        inner,
    );
}

fn field_line(
    label: &str,
    input: &str,
    is_active: bool,
    palette: &ColorPalette,
) -> Line<'static> {
    let cursor = if is_active { "_" } else { " " };
    let style = if is_active {
        Style::default()
            .fg(palette.primary)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(format!("{:<7}", label), Style::default().fg(Color::Gray)),
        Span::styled(format!("{}{}", input, cursor), style),
    ])
}
