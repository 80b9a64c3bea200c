mod aggregate;
mod api;
mod app;
mod events;
mod fetch;
mod models;
mod provider;
mod range;
mod ui;

use aggregate::rows::DateMode;
use api::webhook::WebhookClient;
use app::App;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use events::EventAction;
use range::DateRange;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc, time::Duration};
use tokio::sync::Mutex;

/// Terminal dashboard for webhook-relayed LLM cost and usage telemetry.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Webhook URL relaying the provider feeds (falls back to HOOKTOP_WEBHOOK_URL)
    #[arg(long)]
    webhook_url: Option<String>,

    /// Initial window size in days
    #[arg(long, default_value_t = 7)]
    days: i64,

    /// Take row date bounds from array order instead of min/max
    /// (for feeds that arrive sorted newest-first)
    #[arg(long)]
    array_date_order: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let webhook_url = args
        .webhook_url
        .or_else(|| std::env::var("HOOKTOP_WEBHOOK_URL").ok());
    let Some(webhook_url) = webhook_url else {
        eprintln!("No webhook URL configured.");
        eprintln!("Pass --webhook-url or set HOOKTOP_WEBHOOK_URL (a .env file works too).");
        return Ok(());
    };

    let date_mode = if args.array_date_order {
        DateMode::ArrayOrder
    } else {
        DateMode::MinMax
    };
    let range = DateRange::last_days(args.days.max(1));

    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let app = Arc::new(Mutex::new(App::new(
        WebhookClient::new(webhook_url),
        range,
        date_mode,
    )));

    dispatch_fetch(app.clone()).await;

    loop {
        {
            let mut app_lock = app.lock().await;
            app_lock.update_animation_frame();
            terminal.draw(|f| ui::render(f, &app_lock))?;
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if key.modifiers.contains(KeyModifiers::CONTROL)
                        && key.code == KeyCode::Char('c')
                    {
                        break;
                    }
                    let action = {
                        let mut app_lock = app.lock().await;
                        events::handle_key_event(&mut app_lock, key.code)
                    };
                    match action {
                        EventAction::Dispatch => dispatch_fetch(app.clone()).await,
                        EventAction::Quit => break,
                        EventAction::None => {}
                    }
                }
            }
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Aborts any in-flight query, starts a new generation, and spawns the
/// fetch task. The task applies its outcome under the app lock; stale
/// generations are dropped there.
async fn dispatch_fetch(app: Arc<Mutex<App>>) {
    let (client, query, range, date_mode) = {
        let mut app_lock = app.lock().await;
        app_lock.supersede();
        let query = app_lock.begin_query();
        (
            app_lock.client.clone(),
            query,
            app_lock.controller.range(),
            app_lock.date_mode,
        )
    };

    let app_task = app.clone();
    let handle = tokio::spawn(async move {
        let outcome = fetch::run_query(client, query, range, date_mode).await;
        let mut app_lock = app_task.lock().await;
        app_lock.apply_outcome(outcome);
    });
    app.lock().await.in_flight = Some(handle.abort_handle());
}
