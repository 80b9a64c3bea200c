use crate::models::{BucketSummary, CostBucket};
use crate::range::DateRange;
use serde_json::Value;

/// Pulls cost buckets out of the relayed payload: a bare bucket array or
/// an envelope object carrying one under `data`. Never fails; a malformed
/// bucket decodes to its default and contributes nothing.
pub fn coerce_buckets(input: &Value) -> Vec<CostBucket> {
    match input {
        Value::Array(elements) => decode_buckets(elements),
        Value::Object(map) => match map.get("data") {
            Some(Value::Array(data)) => decode_buckets(data),
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn decode_buckets(values: &[Value]) -> Vec<CostBucket> {
    values
        .iter()
        .map(|value| serde_json::from_value(value.clone()).unwrap_or_default())
        .collect()
}

/// Folds cost buckets into one summary. With no timestamped buckets the
/// date bounds fall back to the active window so the card keeps a sensible
/// label instead of showing zeros.
pub fn reduce_buckets(buckets: &[CostBucket], fallback: DateRange) -> BucketSummary {
    let mut total_cost = 0.0;
    let mut total_records = 0;
    let mut date_min: Option<i64> = None;
    let mut date_max: Option<i64> = None;
    let mut orgs: Vec<String> = Vec::new();

    for bucket in buckets {
        total_records += bucket.results.len();
        for result in &bucket.results {
            total_cost += result
                .amount
                .as_ref()
                .and_then(|amount| amount.value)
                .unwrap_or(0.0);
            if let Some(org) = result.organization_id.as_deref().filter(|s| !s.is_empty()) {
                if !orgs.iter().any(|o| o == org) {
                    orgs.push(org.to_string());
                }
            }
        }
        if let Some(start) = bucket.start_time {
            date_min = Some(date_min.map_or(start, |min| min.min(start)));
        }
        if let Some(end) = bucket.end_time {
            date_max = Some(date_max.map_or(end, |max| max.max(end)));
        }
    }

    BucketSummary {
        total_cost,
        total_records,
        date_min: date_min.unwrap_or(fallback.start),
        date_max: date_max.unwrap_or(fallback.end),
        organization_label: organization_label(&orgs),
    }
}

fn organization_label(orgs: &[String]) -> String {
    match orgs {
        [] => "—".to_string(),
        [only] => only.clone(),
        [first, rest @ ..] => format!("{} + {} more", first, rest.len()),
    }
}
