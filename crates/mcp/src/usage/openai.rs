use openai_cost_core::{DurationUsageRecord, TokenUsageRecord, UsageReport};
use reqwest::blocking::Client;
use serde::Deserialize;

use super::{UsageError, UsageProvider};
use crate::config::UsageClientConfig;

const USER_AGENT: &str = concat!("openai-cost-mcp/", env!("CARGO_PKG_VERSION"));

pub struct OpenAiUsageClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Default, Deserialize)]
struct UsageResponse {
    #[serde(default)]
    data: Option<Vec<TokenUsageItem>>,
    #[serde(default)]
    whisper_api_data: Option<Vec<WhisperUsageItem>>,
}

// Items without a model id are skipped; counts may be integers or floats.
#[derive(Debug, Deserialize)]
struct TokenUsageItem {
    #[serde(default)]
    snapshot_id: Option<String>,
    #[serde(default)]
    n_context_tokens_total: Option<f64>,
    #[serde(default)]
    n_generated_tokens_total: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct WhisperUsageItem {
    #[serde(default)]
    model_id: Option<String>,
    #[serde(default)]
    num_seconds: Option<f64>,
}

// Saturating cast: negative and NaN counts become 0.
fn token_count(value: Option<f64>) -> u64 {
    value.map_or(0, |n| n as u64)
}

impl From<UsageResponse> for UsageReport {
    fn from(response: UsageResponse) -> Self {
        UsageReport {
            token_usage: response
                .data
                .unwrap_or_default()
                .into_iter()
                .filter_map(|item| {
                    Some(TokenUsageRecord {
                        model_id: item.snapshot_id?,
                        context_tokens: token_count(item.n_context_tokens_total),
                        generated_tokens: token_count(item.n_generated_tokens_total),
                    })
                })
                .collect(),
            duration_usage: response
                .whisper_api_data
                .unwrap_or_default()
                .into_iter()
                .filter_map(|item| {
                    Some(DurationUsageRecord {
                        model_id: item.model_id?,
                        seconds: item.num_seconds.unwrap_or(0.0),
                    })
                })
                .collect(),
        }
    }
}

impl OpenAiUsageClient {
    pub fn new(config: &UsageClientConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent(USER_AGENT)
                .timeout(config.timeout)
                .build()
                .unwrap_or_else(|_| Client::new()),
            base_url: config.base_url.clone(),
        }
    }

    fn usage_url(&self, date: &str) -> String {
        format!("{}/usage?date={}", self.base_url, urlencoding::encode(date))
    }

    fn parse_body(body: &str) -> Result<UsageReport, UsageError> {
        let response: UsageResponse =
            serde_json::from_str(body).map_err(|e| UsageError::Decode(e.to_string()))?;
        Ok(response.into())
    }
}

impl Default for OpenAiUsageClient {
    fn default() -> Self {
        Self::new(&UsageClientConfig::default())
    }
}

impl UsageProvider for OpenAiUsageClient {
    fn fetch(&self, api_key: &str, date: &str) -> Result<UsageReport, UsageError> {
        tracing::info!(date, "querying usage");

        let response = self
            .client
            .get(self.usage_url(date))
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .send()
            .inspect_err(|e| tracing::error!("usage request failed: {}", e))?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), "usage request rejected");
            return Err(UsageError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let report = Self::parse_body(&body)?;
        tracing::info!(
            token_records = report.token_usage.len(),
            duration_records = report.duration_usage.len(),
            "fetched usage"
        );
        Ok(report)
    }
}
