use crate::app::App;
use crate::provider::Branch;
use crate::range::unix_to_ymd;
use crate::ui::banner;
use crate::ui::colors::ColorPalette;
use crate::ui::utils::{format_models, format_money, format_requests};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    render_openai_card(f, app, columns[0]);
    render_openrouter_card(f, app, columns[1]);
}

fn render_openai_card(f: &mut Frame, app: &App, area: Rect) {
    let palette = ColorPalette::for_branch(Branch::OpenAi);
    let block = card_block(Branch::OpenAi.label(), &palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let state = &app.openai;
    let mut lines = error_lines(state.error.as_deref(), &palette);

    match &state.summary {
        Some(summary) => {
            add_labeled_value(
                &mut lines,
                "Total cost",
                &format_money(summary.total_cost),
                &palette,
            );
            add_labeled_value(
                &mut lines,
                "Records",
                &summary.total_records.to_string(),
                &palette,
            );
            add_labeled_value(
                &mut lines,
                "Organization",
                &summary.organization_label,
                &palette,
            );
            add_labeled_value(
                &mut lines,
                "Window",
                &format!(
                    "{} → {}",
                    unix_to_ymd(summary.date_min),
                    unix_to_ymd(summary.date_max)
                ),
                &palette,
            );
            add_updated_at(&mut lines, state.updated_at);
        }
        None => lines.extend(placeholder_lines(app, &palette)),
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn render_openrouter_card(f: &mut Frame, app: &App, area: Rect) {
    let palette = ColorPalette::for_branch(Branch::OpenRouter);
    let block = card_block(Branch::OpenRouter.label(), &palette);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let state = &app.openrouter;
    let mut lines = error_lines(state.error.as_deref(), &palette);

    match &state.summary {
        Some(summary) => {
            add_labeled_value(
                &mut lines,
                "Credits used",
                &format_money(summary.credits_used),
                &palette,
            );
            add_labeled_value(
                &mut lines,
                "Credits left",
                &format_money(summary.credits_remaining),
                &palette,
            );
            add_labeled_value(
                &mut lines,
                "Total cost",
                &format_money(summary.total_cost),
                &palette,
            );
            add_labeled_value(
                &mut lines,
                "Requests",
                &format_requests(summary.requests),
                &palette,
            );
            add_labeled_value(&mut lines, "Models", &format_models(&summary.models), &palette);
            let window = match (&summary.start_date, &summary.end_date) {
                (Some(start), Some(end)) => format!("{} → {}", start, end),
                _ => "no dated rows".to_string(),
            };
            add_labeled_value(&mut lines, "Window", &window, &palette);
            add_updated_at(&mut lines, state.updated_at);
        }
        None => lines.extend(placeholder_lines(app, &palette)),
    }

    f.render_widget(Paragraph::new(lines), inner);
}

fn card_block(title: &str, palette: &ColorPalette) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.primary))
        .title(format!(" {} ", title))
        .title_style(
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        )
}

fn error_lines(error: Option<&str>, palette: &ColorPalette) -> Vec<Line<'static>> {
    match error {
        Some(message) => vec![
            Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(palette.error),
            )),
            Line::from(""),
        ],
        None => Vec::new(),
    }
}

fn placeholder_lines(app: &App, palette: &ColorPalette) -> Vec<Line<'static>> {
    if app.is_loading() {
        banner::render_animated_banner(app, palette)
    } else {
        vec![Line::from(Span::styled(
            "No data yet, press r to fetch",
            Style::default().fg(Color::Gray),
        ))]
    }
}

fn add_labeled_value(
    lines: &mut Vec<Line<'static>>,
    label: &str,
    value: &str,
    palette: &ColorPalette,
) {
    lines.push(Line::from(vec![
        Span::styled(
            format!("{:<14}", label),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            value.to_string(),
            Style::default()
                .fg(palette.primary)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
}

fn add_updated_at(lines: &mut Vec<Line<'static>>, updated_at: Option<chrono::DateTime<chrono::Utc>>) {
    if let Some(at) = updated_at {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("updated {}", at.format("%H:%M:%S UTC")),
            Style::default().fg(Color::DarkGray),
        )));
    }
}
