mod openai;

use openai_cost_core::UsageReport;
use thiserror::Error;

pub use openai::OpenAiUsageClient;

#[derive(Debug, Error)]
pub enum UsageError {
    #[error("Request failed with status code {status}")]
    Status { status: u16, body: String },
    #[error("{0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid usage payload: {0}")]
    Decode(String),
}

impl UsageError {
    pub fn status(&self) -> Option<u16> {
        match self {
            UsageError::Status { status, .. } => Some(*status),
            UsageError::Request(e) => e.status().map(|s| s.as_u16()),
            UsageError::Decode(_) => None,
        }
    }
}

/// Source of per-day usage records. `date` is already canonical (`YYYY-MM-DD`).
pub trait UsageProvider: Send + Sync {
    fn fetch(&self, api_key: &str, date: &str) -> Result<UsageReport, UsageError>;
}
