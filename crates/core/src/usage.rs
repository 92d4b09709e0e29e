#[derive(Debug, Clone, PartialEq)]
pub struct TokenUsageRecord {
    pub model_id: String,
    pub context_tokens: u64,
    pub generated_tokens: u64,
}

/// Usage billed by elapsed processing time, e.g. audio transcription.
#[derive(Debug, Clone, PartialEq)]
pub struct DurationUsageRecord {
    pub model_id: String,
    pub seconds: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsageReport {
    pub token_usage: Vec<TokenUsageRecord>,
    pub duration_usage: Vec<DurationUsageRecord>,
}

impl UsageReport {
    pub fn is_empty(&self) -> bool {
        self.token_usage.is_empty() && self.duration_usage.is_empty()
    }
}
