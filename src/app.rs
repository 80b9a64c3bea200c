use crate::aggregate::rows::DateMode;
use crate::api::webhook::WebhookClient;
use crate::models::{BucketSummary, ProviderSummary};
use crate::provider::{BranchState, FetchOutcome};
use crate::range::{
    adjusted_query_date, unix_to_date, DateRange, FetchQuery, QueryParams, RangeController,
};
use crossterm::event::KeyCode;
use tokio::task::AbortHandle;

/// How the active window is sent upstream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryMode {
    /// `start_date`/`end_date` as unix seconds; feeds both cards.
    Window,
    /// One calendar day (the window's end date, UTC-adjusted); only the
    /// OpenRouter card refreshes.
    SingleDay,
}

impl QueryMode {
    pub fn label(self) -> &'static str {
        match self {
            QueryMode::Window => "Window",
            QueryMode::SingleDay => "Single day",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            QueryMode::Window => QueryMode::SingleDay,
            QueryMode::SingleDay => QueryMode::Window,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorField {
    Start,
    End,
}

/// The range editor popup's input state.
pub struct RangeEditor {
    pub start_input: String,
    pub end_input: String,
    pub field: EditorField,
    pub message: Option<String>,
}

pub struct App {
    pub client: WebhookClient,
    pub controller: RangeController,
    pub query_mode: QueryMode,
    pub date_mode: DateMode,
    pub openai: BranchState<BucketSummary>,
    pub openrouter: BranchState<ProviderSummary>,
    pub editor: Option<RangeEditor>,
    pub animation_frame: u32,
    pub in_flight: Option<AbortHandle>,
}

impl App {
    pub fn new(client: WebhookClient, range: DateRange, date_mode: DateMode) -> Self {
        Self {
            client,
            controller: RangeController::new(range),
            query_mode: QueryMode::Window,
            date_mode,
            openai: BranchState::default(),
            openrouter: BranchState::default(),
            editor: None,
            animation_frame: 0,
            in_flight: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.controller.is_fetching()
    }

    /// Aborts the in-flight task, if any. The generation check in
    /// `apply_outcome` catches anything that slips through anyway.
    pub fn supersede(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    /// Builds the outbound parameters for the current mode and starts a
    /// new generation.
    pub fn begin_query(&mut self) -> FetchQuery {
        let range = self.controller.range();
        let params = match self.query_mode {
            QueryMode::Window => QueryParams::Window {
                start: range.start,
                end: range.end,
            },
            QueryMode::SingleDay => {
                let date = unix_to_date(range.end)
                    .map(adjusted_query_date)
                    .unwrap_or_else(|| range.end_ymd());
                QueryParams::SingleDay { date }
            }
        };
        self.controller.begin(params)
    }

    /// Applies a settled fetch. Outcomes from superseded generations are
    /// dropped without touching any card.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        if !self.controller.settle(outcome.generation) {
            return;
        }
        self.in_flight = None;
        if let Some(result) = outcome.openai {
            self.openai.apply(result, outcome.fetched_at);
        }
        if let Some(result) = outcome.openrouter {
            self.openrouter.apply(result, outcome.fetched_at);
        }
    }

    pub fn toggle_query_mode(&mut self) {
        self.query_mode = self.query_mode.toggled();
    }

    pub fn has_any_data(&self) -> bool {
        self.openai.summary.is_some() || self.openrouter.summary.is_some()
    }

    pub fn update_animation_frame(&mut self) {
        if self.is_loading() || !self.has_any_data() {
            self.animation_frame = self.animation_frame.wrapping_add(1);
        } else {
            self.animation_frame = 0;
        }
    }

    pub fn open_editor(&mut self) {
        let range = self.controller.range();
        self.editor = Some(RangeEditor {
            start_input: range.start_ymd(),
            end_input: range.end_ymd(),
            field: EditorField::Start,
            message: None,
        });
    }

    pub fn cancel_editor(&mut self) {
        self.editor = None;
    }

    pub fn toggle_editor_field(&mut self) {
        if let Some(editor) = self.editor.as_mut() {
            editor.field = match editor.field {
                EditorField::Start => EditorField::End,
                EditorField::End => EditorField::Start,
            };
        }
    }

    pub fn handle_editor_input(&mut self, key_code: KeyCode) {
        if let Some(editor) = self.editor.as_mut() {
            let input = match editor.field {
                EditorField::Start => &mut editor.start_input,
                EditorField::End => &mut editor.end_input,
            };
            match key_code {
                KeyCode::Char(c) => input.push(c),
                KeyCode::Backspace => {
                    input.pop();
                }
                _ => {}
            }
        }
    }

    /// Validates the edited window. On success the editor closes and the
    /// caller dispatches a fetch; on rejection the active range stays and
    /// the message lands in the popup.
    pub fn submit_editor(&mut self) -> bool {
        let Some(editor) = self.editor.as_mut() else {
            return false;
        };
        let start = editor.start_input.clone();
        let end = editor.end_input.clone();
        match self.controller.apply_window(&start, &end) {
            Ok(()) => {
                self.editor = None;
                true
            }
            Err(err) => {
                editor.message = Some(err.to_string());
                false
            }
        }
    }
}
