use crate::aggregate::rows::DateMode;
use crate::aggregate::{buckets, rows};
use crate::api::webhook::WebhookClient;
use crate::models::{BucketSummary, ProviderSummary};
use crate::provider::FetchOutcome;
use crate::range::{DateRange, FetchQuery, QueryParams};
use chrono::Utc;
use serde_json::Value;

/// Runs one webhook query end to end: GET, branch scoping, coercion,
/// reduction. Window queries feed both cards; single-day queries only
/// refresh the OpenRouter card.
pub async fn run_query(
    client: WebhookClient,
    query: FetchQuery,
    range: DateRange,
    date_mode: DateMode,
) -> FetchOutcome {
    let single_day = matches!(query.params, QueryParams::SingleDay { .. });
    let (openai, openrouter) = match client.fetch_payload(&query.params).await {
        Ok(payload) => {
            let openai = (!single_day).then(|| Ok(reduce_openai(&payload, range)));
            (openai, Some(Ok(reduce_openrouter(&payload, date_mode))))
        }
        Err(err) => {
            let message = format!("{:#}", err);
            let openai = (!single_day).then(|| Err(message.clone()));
            (openai, Some(Err(message)))
        }
    };
    FetchOutcome {
        generation: query.generation,
        fetched_at: Utc::now(),
        openai,
        openrouter,
    }
}

// The response is either `{ "openai": ..., "openrouter": ... }` or a bare
// branch payload when the webhook is already scoped to one provider.
fn scoped<'a>(payload: &'a Value, key: &str) -> &'a Value {
    payload.get(key).unwrap_or(payload)
}

pub fn reduce_openai(payload: &Value, fallback: DateRange) -> BucketSummary {
    let coerced = buckets::coerce_buckets(scoped(payload, "openai"));
    buckets::reduce_buckets(&coerced, fallback)
}

pub fn reduce_openrouter(payload: &Value, date_mode: DateMode) -> ProviderSummary {
    let coerced = rows::coerce_rows(scoped(payload, "openrouter"));
    rows::reduce_rows(&coerced, date_mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::RawQuery;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    const RANGE: DateRange = DateRange {
        start: 1_000,
        end: 2_000,
    };

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn window_query(generation: u64) -> FetchQuery {
        FetchQuery {
            generation,
            params: QueryParams::Window {
                start: RANGE.start,
                end: RANGE.end,
            },
        }
    }

    #[tokio::test]
    async fn window_query_populates_both_branches() {
        let seen: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
        let seen_by_handler = seen.clone();
        let router = Router::new().route(
            "/",
            get(move |RawQuery(query): RawQuery| {
                let seen = seen_by_handler.clone();
                async move {
                    *seen.lock().unwrap() = query;
                    Json(json!({
                        "openai": [
                            {"start_time": 100, "end_time": 200, "results": [
                                {"amount": {"value": 2.5, "currency": "usd"}, "organization_id": "org-a"}
                            ]}
                        ],
                        "openrouter": {"data": [
                            {"date": "2024-01-03", "usage": "1.5", "requests": 2, "model": "gpt-4"}
                        ]}
                    }))
                }
            }),
        );
        let url = serve(router).await;

        let client = WebhookClient::new(url);
        let outcome = run_query(client, window_query(1), RANGE, DateMode::MinMax).await;

        assert_eq!(
            seen.lock().unwrap().as_deref(),
            Some("start_date=1000&end_date=2000")
        );
        let openai = outcome.openai.unwrap().unwrap();
        assert_eq!(openai.total_cost, 2.5);
        assert_eq!(openai.total_records, 1);
        assert_eq!(openai.organization_label, "org-a");
        let openrouter = outcome.openrouter.unwrap().unwrap();
        assert_eq!(openrouter.total_cost, 1.5);
        assert_eq!(openrouter.models, vec!["gpt-4"]);
    }

    #[tokio::test]
    async fn single_day_query_skips_the_openai_branch() {
        let router = Router::new().route(
            "/",
            get(|| async { Json(json!([{"date": "2024-03-09", "usage": 4}])) }),
        );
        let url = serve(router).await;

        let query = FetchQuery {
            generation: 1,
            params: QueryParams::SingleDay {
                date: "2024-03-09".to_string(),
            },
        };
        let client = WebhookClient::new(url);
        let outcome = run_query(client, query, RANGE, DateMode::MinMax).await;

        assert!(outcome.openai.is_none());
        let openrouter = outcome.openrouter.unwrap().unwrap();
        assert_eq!(openrouter.total_cost, 4.0);
        assert_eq!(openrouter.start_date.as_deref(), Some("2024-03-09"));
    }

    #[tokio::test]
    async fn server_error_surfaces_the_status() {
        let router = Router::new().route(
            "/",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let url = serve(router).await;

        let client = WebhookClient::new(url);
        let outcome = run_query(client, window_query(1), RANGE, DateMode::MinMax).await;

        let err = outcome.openrouter.unwrap().unwrap_err();
        assert!(err.contains("500"), "error should carry the status: {err}");
        assert!(outcome.openai.unwrap().is_err());
    }

    #[tokio::test]
    async fn unrecognized_payload_degrades_to_empty_summaries() {
        let router = Router::new().route(
            "/",
            get(|| async { Json(json!({"unexpected": true})) }),
        );
        let url = serve(router).await;

        let client = WebhookClient::new(url);
        let outcome = run_query(client, window_query(1), RANGE, DateMode::MinMax).await;

        let openai = outcome.openai.unwrap().unwrap();
        assert_eq!(openai.total_records, 0);
        assert_eq!(openai.date_min, RANGE.start);
        assert_eq!(openai.date_max, RANGE.end);
        let openrouter = outcome.openrouter.unwrap().unwrap();
        assert_eq!(openrouter.total_cost, 0.0);
        assert!(openrouter.start_date.is_none());
    }

    #[test]
    fn bare_branch_payloads_are_scoped_to_themselves() {
        let rows_only = json!([{"usage": 2, "date": "2024-01-01"}]);
        let summary = reduce_openrouter(&rows_only, DateMode::MinMax);
        assert_eq!(summary.total_cost, 2.0);

        let buckets_only = json!([{"start_time": 7, "end_time": 8, "results": [
            {"amount": {"value": 1.0}}
        ]}]);
        let summary = reduce_openai(&buckets_only, RANGE);
        assert_eq!(summary.total_cost, 1.0);
        assert_eq!(summary.date_min, 7);
    }
}
