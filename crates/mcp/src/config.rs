use clap::ValueEnum;
use std::time::Duration;

pub const DEFAULT_USAGE_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// What `get_model_pricing` renders for a model missing from the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum UnknownModelLookup {
    /// Fall back to the full categorized table.
    #[default]
    FullTable,
    /// Say that the model has no pricing entry.
    NotFound,
}

#[derive(Debug, Clone, Default)]
pub struct ServerConfig {
    /// Reject `tools/list` and `tools/call` until `initialize` has been seen.
    pub require_initialize: bool,
    /// Answer unparsable lines with a parse error instead of dropping them.
    pub reply_to_parse_errors: bool,
    pub unknown_model: UnknownModelLookup,
}

#[derive(Debug, Clone)]
pub struct UsageClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl UsageClientConfig {
    pub fn new(base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

impl Default for UsageClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_USAGE_BASE_URL, DEFAULT_TIMEOUT_SECS)
    }
}
