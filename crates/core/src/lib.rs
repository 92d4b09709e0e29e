pub mod cost;
pub mod date;
pub mod pricing;
pub mod usage;

pub use cost::{aggregate, aggregate_report, CostBreakdown};
pub use date::{normalize_date, normalize_date_for_year};
pub use pricing::{
    BillingUnit, CategoryListing, PricingEntry, PricingError, PricingTable, OTHER_CATEGORY,
    PRICING_CATEGORIES,
};
pub use usage::{DurationUsageRecord, TokenUsageRecord, UsageReport};
