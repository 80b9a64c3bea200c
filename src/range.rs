use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::fmt;

/// Closed UTC date window in unix seconds. Both edges are UTC midnights.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DateRange {
    pub start: i64,
    pub end: i64,
}

impl DateRange {
    /// Window covering the last `days` days, ending today.
    pub fn last_days(days: i64) -> Self {
        let today = Utc::now().date_naive();
        Self {
            start: ymd_to_unix(today - Duration::days(days)),
            end: ymd_to_unix(today),
        }
    }

    pub fn start_ymd(&self) -> String {
        unix_to_ymd(self.start)
    }

    pub fn end_ymd(&self) -> String {
        unix_to_ymd(self.end)
    }
}

pub fn parse_ymd(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
}

pub fn ymd_to_unix(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0).unwrap().and_utc().timestamp()
}

pub fn unix_to_date(ts: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp(ts, 0).map(|dt| dt.date_naive())
}

pub fn unix_to_ymd(ts: i64) -> String {
    unix_to_date(ts)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| ts.to_string())
}

/// The relayed provider reports a day behind UTC, so a single-day query for
/// `2024-03-10` goes upstream as `2024-03-09`.
pub fn adjusted_query_date(date: NaiveDate) -> String {
    (date - Duration::days(1)).format("%Y-%m-%d").to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    Unparseable(String),
    Backwards,
}

impl fmt::Display for RangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeError::Unparseable(input) => {
                write!(f, "not a date: {} (want YYYY-MM-DD)", input)
            }
            RangeError::Backwards => write!(f, "end date must be on or after start date"),
        }
    }
}

/// Outbound query for one webhook call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryParams {
    /// `start_date`/`end_date` in unix seconds.
    Window { start: i64, end: i64 },
    /// `date=YYYY-MM-DD`, already adjusted for the upstream's UTC lag.
    SingleDay { date: String },
}

#[derive(Clone, Debug)]
pub struct FetchQuery {
    pub generation: u64,
    pub params: QueryParams,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Idle,
    Fetching,
}

/// Owns the active window and the fetch lifecycle around it.
///
/// Every dispatched query carries a generation number; an outcome may only
/// be applied when `settle` accepts that number, so a late response from a
/// superseded query can never overwrite newer state.
pub struct RangeController {
    range: DateRange,
    generation: u64,
    phase: Phase,
}

impl RangeController {
    pub fn new(range: DateRange) -> Self {
        Self {
            range,
            generation: 0,
            phase: Phase::Idle,
        }
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn is_fetching(&self) -> bool {
        self.phase == Phase::Fetching
    }

    /// Validates and installs an edited window. Rejected edits leave the
    /// active range untouched.
    pub fn apply_window(&mut self, start_input: &str, end_input: &str) -> Result<(), RangeError> {
        let start = parse_ymd(start_input)
            .ok_or_else(|| RangeError::Unparseable(start_input.trim().to_string()))?;
        let end = parse_ymd(end_input)
            .ok_or_else(|| RangeError::Unparseable(end_input.trim().to_string()))?;
        if end < start {
            return Err(RangeError::Backwards);
        }
        self.range = DateRange {
            start: ymd_to_unix(start),
            end: ymd_to_unix(end),
        };
        Ok(())
    }

    /// Starts a new fetch against the given parameters, superseding any
    /// query still in flight.
    pub fn begin(&mut self, params: QueryParams) -> FetchQuery {
        self.generation += 1;
        self.phase = Phase::Fetching;
        FetchQuery {
            generation: self.generation,
            params,
        }
    }

    /// Accepts an outcome only if it belongs to the newest query.
    pub fn settle(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            return false;
        }
        self.phase = Phase::Idle;
        true
    }
}
