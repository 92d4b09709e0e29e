use std::collections::BTreeMap;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    #[error("invalid rate for model {model}: {rate}")]
    InvalidRate { model: String, rate: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingUnit {
    PerThousandTokens,
    /// Duration-billed models keep their per-second rate in `context_rate`.
    PerSecond,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingEntry {
    pub context_rate: f64,
    pub generated_rate: f64,
    pub unit: BillingUnit,
}

impl PricingEntry {
    pub const fn tokens(context_rate: f64, generated_rate: f64) -> Self {
        Self {
            context_rate,
            generated_rate,
            unit: BillingUnit::PerThousandTokens,
        }
    }

    pub const fn per_second(rate: f64) -> Self {
        Self {
            context_rate: rate,
            generated_rate: 0.0,
            unit: BillingUnit::PerSecond,
        }
    }
}

const BUILTIN_PRICING: &[(&str, PricingEntry)] = &[
    ("gpt-3.5-turbo-0301", PricingEntry::tokens(0.0015, 0.002)),
    ("gpt-3.5-turbo-0613", PricingEntry::tokens(0.0015, 0.002)),
    ("gpt-3.5-turbo-16k", PricingEntry::tokens(0.003, 0.004)),
    ("gpt-3.5-turbo-16k-0613", PricingEntry::tokens(0.003, 0.004)),
    ("gpt-4-0314", PricingEntry::tokens(0.03, 0.06)),
    ("gpt-4-0613", PricingEntry::tokens(0.03, 0.06)),
    ("gpt-4-32k", PricingEntry::tokens(0.06, 0.12)),
    ("gpt-4-32k-0314", PricingEntry::tokens(0.06, 0.12)),
    ("gpt-4-32k-0613", PricingEntry::tokens(0.06, 0.12)),
    ("gpt-4o", PricingEntry::tokens(0.0025, 0.01)),
    ("gpt-4o-mini", PricingEntry::tokens(0.00015, 0.0006)),
    ("gpt-4o-2024-05-13", PricingEntry::tokens(0.005, 0.015)),
    ("gpt-4o-2024-08-06", PricingEntry::tokens(0.0025, 0.01)),
    ("gpt-5-chat-latest", PricingEntry::tokens(0.00125, 0.01)),
    ("text-embedding-ada-002-v2", PricingEntry::tokens(0.0001, 0.0)),
    ("whisper-1", PricingEntry::per_second(0.0001)),
];

pub const OTHER_CATEGORY: &str = "Other models";

/// Display groups for the full pricing listing, in render order. A model goes
/// to the category with the longest matching prefix.
pub const PRICING_CATEGORIES: &[(&str, &[&str])] = &[
    ("GPT-3.5 series", &["gpt-3.5"]),
    ("GPT-4 series", &["gpt-4"]),
    ("GPT-4o series", &["gpt-4o"]),
    ("GPT-5 series", &["gpt-5"]),
    (OTHER_CATEGORY, &[]),
];

static BUILTIN_TABLE: LazyLock<PricingTable> = LazyLock::new(|| PricingTable {
    entries: BUILTIN_PRICING
        .iter()
        .map(|(model, entry)| (model.to_string(), *entry))
        .collect(),
});

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PricingTable {
    entries: BTreeMap<String, PricingEntry>,
}

pub type CategoryListing<'a> = Vec<(&'static str, Vec<(&'a str, &'a PricingEntry)>)>;

impl PricingTable {
    pub fn builtin() -> &'static PricingTable {
        &BUILTIN_TABLE
    }

    pub fn from_entries<I, S>(entries: I) -> Result<Self, PricingError>
    where
        I: IntoIterator<Item = (S, PricingEntry)>,
        S: Into<String>,
    {
        let mut table = BTreeMap::new();
        for (model, entry) in entries {
            let model = model.into();
            for rate in [entry.context_rate, entry.generated_rate] {
                if !rate.is_finite() || rate < 0.0 {
                    return Err(PricingError::InvalidRate { model, rate });
                }
            }
            table.insert(model, entry);
        }
        Ok(Self { entries: table })
    }

    pub fn get(&self, model: &str) -> Option<&PricingEntry> {
        self.entries.get(model)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PricingEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Groups every entry under [`PRICING_CATEGORIES`]. Empty categories are
    /// dropped; each model appears exactly once.
    pub fn categorize(&self) -> CategoryListing<'_> {
        let mut groups: Vec<(&'static str, Vec<(&str, &PricingEntry)>)> = PRICING_CATEGORIES
            .iter()
            .map(|(name, _)| (*name, Vec::new()))
            .collect();

        for (model, entry) in self.iter() {
            let index = category_index(model);
            groups[index].1.push((model, entry));
        }

        groups.retain(|(_, models)| !models.is_empty());
        groups
    }
}

fn category_index(model: &str) -> usize {
    PRICING_CATEGORIES
        .iter()
        .enumerate()
        .flat_map(|(i, (_, prefixes))| prefixes.iter().map(move |p| (i, p.len(), *p)))
        .filter(|(_, _, prefix)| model.starts_with(prefix))
        .max_by_key(|(_, len, _)| *len)
        .map(|(i, _, _)| i)
        .unwrap_or(PRICING_CATEGORIES.len() - 1)
}
