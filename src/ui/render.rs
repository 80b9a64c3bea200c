use crate::app::App;
use crate::ui::{cards, footer, options, popup};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub fn render(f: &mut Frame, app: &App) {
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.size());

    // Top: query mode + active range
    options::render(f, app, vertical_chunks[0]);

    // Middle: one card per provider branch
    cards::render(f, app, vertical_chunks[1]);

    // Bottom: key help
    footer::render(f, app, vertical_chunks[2]);

    // Overlay: range editor, or a loading popup once cards carry data
    popup::render(f, app);
}
