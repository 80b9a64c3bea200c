use crate::models::{ProviderSummary, UsageRow};
use serde_json::Value;

/// How the summary's date bounds are derived from the rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DateMode {
    /// Lexicographic min/max of the per-row calendar dates. Valid because
    /// YYYY-MM-DD sorts the same way it orders in time.
    #[default]
    MinMax,
    /// Start from the last dated row, end from the first. For feeds that
    /// arrive already sorted newest-first.
    ArrayOrder,
}

/// Pulls a flat row list out of whatever shape the relay sent.
///
/// Tolerated shapes: an array of envelopes each carrying rows under
/// `data`, a single envelope object, or a bare row array. Anything else
/// degrades to an empty list; this never fails.
pub fn coerce_rows(input: &Value) -> Vec<UsageRow> {
    match input {
        Value::Array(elements) => {
            let mut flattened = Vec::new();
            for element in elements {
                if let Some(Value::Array(data)) = element.get("data") {
                    flattened.extend(data.iter().cloned());
                }
            }
            if flattened.is_empty() {
                decode_rows(elements)
            } else {
                decode_rows(&flattened)
            }
        }
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(data)) => decode_rows(data),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn decode_rows(values: &[Value]) -> Vec<UsageRow> {
    values
        .iter()
        .map(|value| serde_json::from_value(value.clone()).unwrap_or_default())
        .collect()
}

/// Folds usage rows into one summary. Rows without a date still count
/// toward the totals and the model list; they are only skipped for the
/// date bounds.
pub fn reduce_rows(rows: &[UsageRow], date_mode: DateMode) -> ProviderSummary {
    let mut total_cost = 0.0;
    let mut requests = 0.0;
    let mut models: Vec<String> = Vec::new();
    let mut dates: Vec<String> = Vec::new();

    for row in rows {
        total_cost += row.usage;
        requests += row.requests;

        let model = row
            .model_permaslug
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| row.model.as_deref().filter(|s| !s.is_empty()));
        if let Some(model) = model {
            if !models.iter().any(|m| m == model) {
                models.push(model.to_string());
            }
        }

        if let Some(date) = row.date.as_deref() {
            dates.push(date.chars().take(10).collect());
        }
    }

    let (start_date, end_date) = match date_mode {
        DateMode::MinMax => (dates.iter().min().cloned(), dates.iter().max().cloned()),
        DateMode::ArrayOrder => (dates.last().cloned(), dates.first().cloned()),
    };

    let total_cost = round_micro(total_cost);
    ProviderSummary {
        credits_used: total_cost,
        credits_remaining: 0.0,
        total_cost,
        requests,
        models,
        start_date,
        end_date,
    }
}

/// Rounds to 6 decimal places so float residue never reaches the display.
fn round_micro(value: f64) -> f64 {
    (value * 1e6).round() / 1e6
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn coerce(input: Value) -> Vec<UsageRow> {
        coerce_rows(&input)
    }

    #[test]
    fn envelope_array_flattens_in_order() {
        let rows = coerce(json!([
            {"data": [{"usage": 1}, {"usage": 2}]},
            {"data": [{"usage": 3}]}
        ]));
        let usages: Vec<f64> = rows.iter().map(|r| r.usage).collect();
        assert_eq!(usages, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn bare_row_array_passes_through() {
        let rows = coerce(json!([{"usage": 5, "model": "gpt-4"}]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].usage, 5.0);
    }

    #[test]
    fn single_envelope_object_unwraps_data() {
        let rows = coerce(json!({"data": [{"usage": 7}]}));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].usage, 7.0);
    }

    #[test]
    fn unusable_shapes_coerce_to_empty() {
        assert!(coerce(json!([])).is_empty());
        assert!(coerce(json!(null)).is_empty());
        assert!(coerce(json!({})).is_empty());
        assert!(coerce(json!("rows")).is_empty());
        assert!(coerce(json!(42)).is_empty());
        assert!(coerce(json!({"data": "not an array"})).is_empty());
    }

    #[test]
    fn malformed_rows_degrade_to_zero_contribution() {
        let rows = coerce(json!([{"usage": 2}, "garbage", {"usage": 3}]));
        assert_eq!(rows.len(), 3);
        let summary = reduce_rows(&rows, DateMode::MinMax);
        assert_eq!(summary.total_cost, 5.0);
    }

    #[test]
    fn empty_input_reduces_to_zero_summary() {
        let summary = reduce_rows(&[], DateMode::MinMax);
        assert_eq!(summary.credits_used, 0.0);
        assert_eq!(summary.credits_remaining, 0.0);
        assert_eq!(summary.total_cost, 0.0);
        assert_eq!(summary.requests, 0.0);
        assert!(summary.models.is_empty());
        assert!(summary.start_date.is_none());
        assert!(summary.end_date.is_none());
    }

    #[test]
    fn minmax_mode_takes_lexicographic_bounds() {
        let rows = coerce(json!([
            {"date": "2024-01-05", "usage": "10.1"},
            {"date": "2024-01-01", "usage": 5}
        ]));
        let summary = reduce_rows(&rows, DateMode::MinMax);
        assert_eq!(summary.start_date.as_deref(), Some("2024-01-01"));
        assert_eq!(summary.end_date.as_deref(), Some("2024-01-05"));
        assert_eq!(summary.total_cost, 15.1);
        assert_eq!(summary.credits_used, 15.1);
    }

    #[test]
    fn array_order_mode_swaps_relative_to_position() {
        let rows = coerce(json!([
            {"date": "2024-01-05", "usage": "10.1"},
            {"date": "2024-01-01", "usage": 5}
        ]));
        let summary = reduce_rows(&rows, DateMode::ArrayOrder);
        // Newest-first feed: start comes from the last row, end from the first.
        assert_eq!(summary.start_date.as_deref(), Some("2024-01-01"));
        assert_eq!(summary.end_date.as_deref(), Some("2024-01-05"));
        assert_eq!(summary.total_cost, 15.1);
    }

    #[test]
    fn date_is_trimmed_to_calendar_day() {
        let rows = coerce(json!([{"date": "2024-02-03 14:15:16", "usage": 1}]));
        let summary = reduce_rows(&rows, DateMode::MinMax);
        assert_eq!(summary.start_date.as_deref(), Some("2024-02-03"));
    }

    #[test]
    fn undated_rows_still_count_toward_totals() {
        let rows = coerce(json!([
            {"usage": 2, "requests": 1, "model": "claude"},
            {"date": "2024-01-02", "usage": 3, "requests": 4}
        ]));
        let summary = reduce_rows(&rows, DateMode::MinMax);
        assert_eq!(summary.total_cost, 5.0);
        assert_eq!(summary.requests, 5.0);
        assert_eq!(summary.models, vec!["claude"]);
        assert_eq!(summary.start_date.as_deref(), Some("2024-01-02"));
        assert_eq!(summary.end_date.as_deref(), Some("2024-01-02"));
    }

    #[test]
    fn models_dedupe_in_first_seen_order() {
        let rows = coerce(json!([
            {"model_permaslug": "gpt-4"},
            {"model_permaslug": "gpt-4"},
            {"model_permaslug": "claude"}
        ]));
        let summary = reduce_rows(&rows, DateMode::MinMax);
        assert_eq!(summary.models, vec!["gpt-4", "claude"]);
    }

    #[test]
    fn permaslug_beats_model_and_empty_strings_are_skipped() {
        let rows = coerce(json!([
            {"model_permaslug": "gpt-4o-2024", "model": "gpt-4o"},
            {"model_permaslug": "", "model": "claude"},
            {"model": ""},
            {}
        ]));
        let summary = reduce_rows(&rows, DateMode::MinMax);
        assert_eq!(summary.models, vec!["gpt-4o-2024", "claude"]);
    }

    #[test]
    fn cost_carries_no_float_residue() {
        let rows = coerce(json!([{"usage": 0.1}, {"usage": 0.2}]));
        let summary = reduce_rows(&rows, DateMode::MinMax);
        assert_eq!(summary.total_cost, 0.3);
        assert_eq!(summary.credits_used, 0.3);
    }
}
