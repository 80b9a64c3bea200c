use crate::app::App;
use crossterm::event::KeyCode;

pub enum EventAction {
    Dispatch,
    Quit,
    None,
}

pub fn handle_key_event(app: &mut App, key_code: KeyCode) -> EventAction {
    // The range editor swallows everything while open.
    if app.editor.is_some() {
        return match key_code {
            KeyCode::Esc => {
                app.cancel_editor();
                EventAction::None
            }
            KeyCode::Tab => {
                app.toggle_editor_field();
                EventAction::None
            }
            KeyCode::Enter => {
                if app.submit_editor() {
                    EventAction::Dispatch
                } else {
                    EventAction::None
                }
            }
            other => {
                app.handle_editor_input(other);
                EventAction::None
            }
        };
    }

    match key_code {
        KeyCode::Left | KeyCode::Right | KeyCode::Char('m') | KeyCode::Char('M') => {
            app.toggle_query_mode();
            EventAction::Dispatch
        }
        KeyCode::Enter | KeyCode::Char('e') | KeyCode::Char('E') => {
            app.open_editor();
            EventAction::None
        }
        KeyCode::Char('r') | KeyCode::Char('R') => EventAction::Dispatch,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => EventAction::Quit,
        _ => EventAction::None,
    }
}
