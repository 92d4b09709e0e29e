use openai_cost_core::{aggregate_report, normalize_date, CostBreakdown, PricingTable};
use serde::Deserialize;
use serde_json::{json, Value};
use std::ops::RangeInclusive;

use super::{text_result, ToolDefinition, QUERY_COST_TOOL};
use crate::usage::{UsageError, UsageProvider};

const KEY_PREFIX: &str = "sk-";
// Legacy keys are 51 characters, project keys around 150.
const KEY_LENGTH: RangeInclusive<usize> = 40..=200;
const DEFAULT_GRANULARITY: i64 = 60;

pub fn definitions() -> Vec<ToolDefinition> {
    vec![ToolDefinition {
        name: QUERY_COST_TOOL.to_string(),
        description: "Query OpenAI API usage for a given date and break the cost down by model"
            .to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "api_key": {
                    "type": "string",
                    "description": "OpenAI API key (sk-... or sk-proj-...)"
                },
                "date": {
                    "type": "string",
                    "description": "Date to query: YYYY-MM-DD, YYYY/MM/DD, MM-DD or MM/DD"
                },
                "granularity": {
                    "type": "integer",
                    "description": "Bucket size in minutes (default 60)",
                    "default": DEFAULT_GRANULARITY
                }
            },
            "required": ["api_key", "date"]
        }),
    }]
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryCostArgs {
    pub api_key: Option<String>,
    pub date: Option<String>,
    /// Accepted for compatibility; cost is always computed for the whole day,
    /// so any JSON value is tolerated here.
    pub granularity: Option<Value>,
}

impl QueryCostArgs {
    /// Bucket size in minutes, falling back to the default for values that
    /// are not integers or integer strings.
    pub fn granularity(&self) -> i64 {
        self.granularity
            .as_ref()
            .and_then(|v| v.as_i64().or_else(|| v.as_str()?.trim().parse().ok()))
            .unwrap_or(DEFAULT_GRANULARITY)
    }
}

fn validate(args: &QueryCostArgs) -> Result<(&str, &str), &'static str> {
    let api_key = args
        .api_key
        .as_deref()
        .filter(|key| key.starts_with(KEY_PREFIX))
        .ok_or("Please provide a valid OpenAI API key (format: sk-... or sk-proj-...)")?;

    if !KEY_LENGTH.contains(&api_key.chars().count()) {
        return Err("API key length is invalid; check that the key is complete");
    }

    let date = args
        .date
        .as_deref()
        .filter(|date| !date.is_empty())
        .ok_or("Please provide a date to query")?;

    Ok((api_key, date))
}

pub fn query_cost(args: &QueryCostArgs, usage: &dyn UsageProvider, table: &PricingTable) -> Value {
    let (api_key, date) = match validate(args) {
        Ok(valid) => valid,
        Err(message) => return text_result(message),
    };

    let canonical = normalize_date(date);
    tracing::debug!(
        date = %canonical,
        granularity = args.granularity(),
        "querying cost"
    );

    let report = match usage.fetch(api_key, &canonical) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("cost query failed: {}", e);
            return text_result(failure_message(&e));
        }
    };

    if report.is_empty() {
        return text_result(format!(
            "No API usage recorded for {}. Total cost: $0.00",
            date
        ));
    }

    let breakdown = aggregate_report(&report, table);
    text_result(render_report(date, &breakdown))
}

fn failure_message(error: &UsageError) -> String {
    match error.status() {
        Some(401) => "Invalid API key; check your OpenAI API key".to_string(),
        Some(429) => "OpenAI API rate limit reached; please retry later".to_string(),
        _ => format!("Query failed: {}", error),
    }
}

pub fn render_report(date: &str, breakdown: &CostBreakdown) -> String {
    let mut output = format!("OpenAI API cost report for {}\n\n", date);
    output.push_str(&format!("Total cost: ${:.4}\n\n", breakdown.total_cost));

    if !breakdown.per_model.is_empty() {
        output.push_str("Cost by model:\n");
        for (model, cost) in breakdown.ranked() {
            output.push_str(&format!(
                "  - {}: ${:.4} ({:.1}%)\n",
                model,
                cost,
                breakdown.share(cost)
            ));
        }
    }

    output.push_str("\nSource: OpenAI usage API");
    output.push_str("\nThe API key is only used for this query and is never stored.");
    output
}
