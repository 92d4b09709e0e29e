use std::collections::BTreeMap;

use crate::pricing::PricingTable;
use crate::usage::{DurationUsageRecord, TokenUsageRecord, UsageReport};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostBreakdown {
    pub total_cost: f64,
    pub per_model: BTreeMap<String, f64>,
}

impl CostBreakdown {
    fn add(&mut self, model: &str, cost: f64) {
        self.total_cost += cost;
        *self.per_model.entry(model.to_string()).or_insert(0.0) += cost;
    }

    /// Models ordered by descending cost, ties by model id.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .per_model
            .iter()
            .map(|(model, cost)| (model.as_str(), *cost))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }

    /// Percentage of the total; 0 when nothing was spent.
    pub fn share(&self, cost: f64) -> f64 {
        if self.total_cost > 0.0 {
            cost / self.total_cost * 100.0
        } else {
            0.0
        }
    }
}

/// Prices token and duration usage against `table`. Records for models the
/// table does not know contribute nothing and never show up in `per_model`.
pub fn aggregate(
    token_records: &[TokenUsageRecord],
    duration_records: &[DurationUsageRecord],
    table: &PricingTable,
) -> CostBreakdown {
    let mut breakdown = CostBreakdown::default();

    for record in token_records {
        let Some(pricing) = table.get(&record.model_id) else {
            continue;
        };
        let cost = (record.context_tokens as f64 / 1000.0) * pricing.context_rate
            + (record.generated_tokens as f64 / 1000.0) * pricing.generated_rate;
        breakdown.add(&record.model_id, cost);
    }

    for record in duration_records {
        let Some(pricing) = table.get(&record.model_id) else {
            continue;
        };
        breakdown.add(&record.model_id, record.seconds * pricing.context_rate);
    }

    breakdown
}

pub fn aggregate_report(report: &UsageReport, table: &PricingTable) -> CostBreakdown {
    aggregate(&report.token_usage, &report.duration_usage, table)
}
