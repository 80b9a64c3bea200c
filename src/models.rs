use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One daily usage record relayed from the OpenRouter-style feed.
///
/// The relay is loose about types: `usage` and `requests` arrive as JSON
/// numbers or numeric strings depending on the workflow that produced them,
/// so both go through [`loose_f64`] and default to zero.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UsageRow {
    pub date: Option<String>,
    #[serde(deserialize_with = "loose_number")]
    pub usage: f64,
    #[serde(deserialize_with = "loose_number")]
    pub requests: f64,
    pub model_permaslug: Option<String>,
    pub model: Option<String>,
}

/// Aggregated view of one OpenRouter-style usage window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderSummary {
    pub credits_used: f64,
    pub credits_remaining: f64,
    pub total_cost: f64,
    pub requests: f64,
    pub models: Vec<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CostAmount {
    pub value: Option<f64>,
    #[allow(dead_code)]
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CostResult {
    pub amount: Option<CostAmount>,
    pub organization_id: Option<String>,
    #[allow(dead_code)]
    pub line_item: Option<String>,
    #[allow(dead_code)]
    pub project_id: Option<String>,
}

/// One time bucket from the OpenAI-style cost feed. Timestamps are unix
/// seconds; either edge may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CostBucket {
    pub start_time: Option<i64>,
    pub end_time: Option<i64>,
    pub results: Vec<CostResult>,
}

/// Aggregated view of one OpenAI-style cost window.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BucketSummary {
    pub total_cost: f64,
    pub total_records: usize,
    pub date_min: i64,
    pub date_max: i64,
    pub organization_label: String,
}

/// Best-effort conversion of a JSON value to a finite float. Accepts
/// numbers and numeric strings; everything else is `None`.
pub fn loose_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

fn loose_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(loose_f64(&value).unwrap_or(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn loose_f64_accepts_numbers_and_numeric_strings() {
        assert_eq!(loose_f64(&json!(12.5)), Some(12.5));
        assert_eq!(loose_f64(&json!(7)), Some(7.0));
        assert_eq!(loose_f64(&json!("12.5")), Some(12.5));
        assert_eq!(loose_f64(&json!("  3 ")), Some(3.0));
        assert_eq!(loose_f64(&json!("1e3")), Some(1000.0));
    }

    #[test]
    fn loose_f64_rejects_everything_else() {
        assert_eq!(loose_f64(&json!("not a number")), None);
        assert_eq!(loose_f64(&json!("")), None);
        assert_eq!(loose_f64(&json!(null)), None);
        assert_eq!(loose_f64(&json!(true)), None);
        assert_eq!(loose_f64(&json!({"value": 1})), None);
        assert_eq!(loose_f64(&json!("NaN")), None);
        assert_eq!(loose_f64(&json!("inf")), None);
    }

    #[test]
    fn usage_row_tolerates_string_numbers_and_missing_fields() {
        let row: UsageRow = serde_json::from_value(json!({
            "date": "2024-01-05T00:00:00Z",
            "usage": "10.1",
            "requests": 3,
            "model": "gpt-4"
        }))
        .unwrap();
        assert_eq!(row.usage, 10.1);
        assert_eq!(row.requests, 3.0);
        assert_eq!(row.model.as_deref(), Some("gpt-4"));

        let empty: UsageRow = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.usage, 0.0);
        assert_eq!(empty.requests, 0.0);
        assert!(empty.date.is_none());
    }

    #[test]
    fn usage_row_zeroes_unusable_numbers() {
        let row: UsageRow = serde_json::from_value(json!({
            "usage": "a lot",
            "requests": null
        }))
        .unwrap();
        assert_eq!(row.usage, 0.0);
        assert_eq!(row.requests, 0.0);
    }

    #[test]
    fn cost_bucket_tolerates_missing_fields() {
        let bucket: CostBucket = serde_json::from_value(json!({
            "start_time": 1710028800,
            "results": [
                {"amount": {"value": 1.25, "currency": "usd"}},
                {}
            ]
        }))
        .unwrap();
        assert_eq!(bucket.start_time, Some(1710028800));
        assert!(bucket.end_time.is_none());
        assert_eq!(bucket.results.len(), 2);
        assert!(bucket.results[1].amount.is_none());
    }
}
