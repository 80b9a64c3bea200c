use crate::range::QueryParams;
use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;

/// Client for the relay webhook: one GET per query, JSON body back. The
/// caller decides what to make of the payload.
#[derive(Clone)]
pub struct WebhookClient {
    client: Client,
    base_url: String,
}

impl WebhookClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    pub fn query_url(&self, params: &QueryParams) -> String {
        match params {
            QueryParams::Window { start, end } => {
                format!("{}?start_date={}&end_date={}", self.base_url, start, end)
            }
            QueryParams::SingleDay { date } => {
                format!("{}?date={}", self.base_url, urlencoding::encode(date))
            }
        }
    }

    pub async fn fetch_payload(&self, params: &QueryParams) -> Result<Value> {
        let url = self.query_url(params);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach webhook")?;
        let status = response.status();
        let text = response.text().await.context("Failed to read response")?;
        if !status.is_success() {
            return Err(anyhow::anyhow!(
                "Webhook error: {} - {}",
                status,
                text.chars().take(200).collect::<String>()
            ));
        }
        let payload: Value = serde_json::from_str(&text).context(format!(
            "Failed to parse webhook response: {}",
            text.chars().take(200).collect::<String>()
        ))?;
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_queries_carry_unix_bounds() {
        let client = WebhookClient::new("http://relay.test/hook".to_string());
        let url = client.query_url(&QueryParams::Window {
            start: 1_710_028_800,
            end: 1_710_633_600,
        });
        assert_eq!(
            url,
            "http://relay.test/hook?start_date=1710028800&end_date=1710633600"
        );
    }

    #[test]
    fn single_day_queries_carry_an_encoded_date() {
        let client = WebhookClient::new("http://relay.test/hook".to_string());
        let url = client.query_url(&QueryParams::SingleDay {
            date: "2024-03-09".to_string(),
        });
        assert_eq!(url, "http://relay.test/hook?date=2024-03-09");
    }
}
