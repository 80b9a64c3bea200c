use crate::models::{BucketSummary, ProviderSummary};
use chrono::{DateTime, Utc};

/// The two provider feeds the webhook relays.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Branch {
    OpenAi,
    OpenRouter,
}

impl Branch {
    pub fn label(self) -> &'static str {
        match self {
            Branch::OpenAi => "OpenAI",
            Branch::OpenRouter => "OpenRouter",
        }
    }
}

/// Display state for one provider card.
#[derive(Clone, Debug, Default)]
pub struct BranchState<T> {
    pub summary: Option<T>,
    pub error: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl<T> BranchState<T> {
    /// Stores one settled fetch result. A failure keeps the previous
    /// summary on screen and only swaps in the error message.
    pub fn apply(&mut self, result: Result<T, String>, at: DateTime<Utc>) {
        match result {
            Ok(summary) => {
                self.summary = Some(summary);
                self.error = None;
                self.updated_at = Some(at);
            }
            Err(message) => {
                self.error = Some(message);
            }
        }
    }
}

/// Everything one settled webhook query produced. `None` means the branch
/// was not part of that query (single-day mode only refreshes OpenRouter).
pub struct FetchOutcome {
    pub generation: u64,
    pub fetched_at: DateTime<Utc>,
    pub openai: Option<Result<BucketSummary, String>>,
    pub openrouter: Option<Result<ProviderSummary, String>>,
}
