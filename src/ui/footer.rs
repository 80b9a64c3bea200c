use crate::app::App;
use crate::provider::Branch;
use crate::ui::colors::ColorPalette;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let palette = ColorPalette::for_branch(Branch::OpenAi);

    let mut spans = vec![
        Span::raw("Commands: "),
        Span::styled("←/→", Style::default().fg(palette.accent)),
        Span::raw("=query mode "),
        Span::raw("| "),
        Span::styled("e", Style::default().fg(palette.accent)),
        Span::raw("=edit range "),
        Span::raw("| "),
        Span::styled("r", Style::default().fg(palette.primary)),
        Span::raw("=refresh "),
        Span::raw("| "),
        Span::styled("q", Style::default().fg(palette.error)),
        Span::raw("=quit"),
    ];

    if app.editor.is_some() {
        spans = vec![
            Span::raw("Editor: "),
            Span::styled("Tab", Style::default().fg(palette.accent)),
            Span::raw("=switch field "),
            Span::raw("| "),
            Span::styled("Enter", Style::default().fg(palette.primary)),
            Span::raw("=apply "),
            Span::raw("| "),
            Span::styled("Esc", Style::default().fg(palette.error)),
            Span::raw("=cancel"),
        ];
    }

    f.render_widget(
        Paragraph::new(vec![Line::from(spans)])
            .block(Block::default().borders(Borders::ALL))
            .alignment(ratatui::layout::Alignment::Center),
        area,
    );
}
