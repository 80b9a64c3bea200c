use crate::app::{App, QueryMode};
use crate::provider::Branch;
use crate::ui::colors::ColorPalette;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let palette = ColorPalette::for_branch(Branch::OpenAi);

    let block = Block::default().borders(Borders::ALL).title("Query");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner);

    render_mode_column(f, app, chunks[0], &palette);
    render_range_column(f, app, chunks[1], &palette);
}

fn render_mode_column(f: &mut Frame, app: &App, area: Rect, palette: &ColorPalette) {
    let modes = [QueryMode::Window, QueryMode::SingleDay];
    let mut spans = vec![Span::styled(
        "Mode  ",
        Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
    )];

    for mode in modes {
        let is_selected = app.query_mode == mode;
        let style = if is_selected {
            Style::default()
                .fg(palette.selected_fg)
                .bg(palette.selected_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", mode.label()), style));
        spans.push(Span::raw(" "));
    }

    f.render_widget(
        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Left),
        area,
    );
}

fn render_range_column(f: &mut Frame, app: &App, area: Rect, palette: &ColorPalette) {
    let range = app.controller.range();
    let window = match app.query_mode {
        QueryMode::Window => format!("{} → {}", range.start_ymd(), range.end_ymd()),
        QueryMode::SingleDay => range.end_ymd(),
    };

    let mut spans = vec![
        Span::styled(
            "Range  ",
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            window,
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if app.is_loading() {
        spans.push(Span::styled(
            "  fetching...",
            Style::default().fg(palette.accent),
        ));
    }

    f.render_widget(
        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Left),
        area,
    );
}
