use openai_cost_core::{BillingUnit, PricingEntry, PricingTable};
use serde::Deserialize;
use serde_json::{json, Value};

use super::{text_result, ToolDefinition, MODEL_PRICING_TOOL};
use crate::config::UnknownModelLookup;

pub fn definitions() -> Vec<ToolDefinition> {
    vec![ToolDefinition {
        name: MODEL_PRICING_TOOL.to_string(),
        description: "Show OpenAI model pricing used for cost calculation".to_string(),
        input_schema: json!({
            "type": "object",
            "properties": {
                "model": {
                    "type": "string",
                    "description": "Model name; leave empty to list every model"
                }
            }
        }),
    }]
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PricingArgs {
    pub model: Option<String>,
}

pub fn model_pricing(
    args: &PricingArgs,
    table: &PricingTable,
    unknown: UnknownModelLookup,
) -> Value {
    let model = args.model.as_deref().filter(|m| !m.is_empty());

    match model.map(|m| (m, table.get(m))) {
        Some((model, Some(entry))) => text_result(render_model(model, entry)),
        Some((model, None)) if unknown == UnknownModelLookup::NotFound => {
            text_result(format!(
                "No pricing found for model '{}'. Call {} without a model to list the {} supported models.",
                model,
                MODEL_PRICING_TOOL,
                table.len()
            ))
        }
        _ => text_result(render_table(table)),
    }
}

fn render_model(model: &str, entry: &PricingEntry) -> String {
    match entry.unit {
        BillingUnit::PerThousandTokens => format!(
            "Pricing for {}:\n  - Input tokens: ${:.4}/1K tokens\n  - Output tokens: ${:.4}/1K tokens",
            model, entry.context_rate, entry.generated_rate
        ),
        BillingUnit::PerSecond => format!(
            "Pricing for {}:\n  - Audio: ${:.4}/second",
            model, entry.context_rate
        ),
    }
}

fn render_rates(entry: &PricingEntry) -> String {
    match entry.unit {
        BillingUnit::PerThousandTokens => format!(
            "Input ${:.4}/1K, Output ${:.4}/1K",
            entry.context_rate, entry.generated_rate
        ),
        BillingUnit::PerSecond => format!("${:.4}/second", entry.context_rate),
    }
}

fn render_table(table: &PricingTable) -> String {
    let mut output = String::from("OpenAI model pricing:\n\n");

    for (category, models) in table.categorize() {
        output.push_str(&format!("{}:\n", category));
        for (model, entry) in models {
            output.push_str(&format!("  - {}: {}\n", model, render_rates(entry)));
        }
        output.push('\n');
    }

    output.push_str(&format!("Supported models: {}", table.len()));
    output
}
