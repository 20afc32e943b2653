//! Recommendation types, prompt and response schema

pub mod prompt;
mod schema;

pub use prompt::{build_name_prompt, build_outfit_prompt, SYSTEM_INSTRUCTION};
pub use schema::{
    parse_outfit_plan, AlternativePick, Confidence, ItemPick, OutfitPlan, OutfitSelection,
};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use wardrobe_llm::UsageSnapshot;

/// Accounting attached to every recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationMetadata {
    /// Model that produced the plan
    pub model: String,
    /// Cost of the call (USD, 4 decimal places)
    pub cost_usd: f64,
    /// Prompt plus completion tokens
    pub tokens_used: u32,
    /// Usage after this call was recorded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_stats: Option<UsageSnapshot>,
    /// Free-form note for the caller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A structured outfit recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// What the model picked
    #[serde(flatten)]
    pub plan: OutfitPlan,
    /// Model, cost and usage
    pub metadata: RecommendationMetadata,
}

/// Name used when no generated name is available, e.g. "Outfit Mar 14"
#[must_use]
pub fn fallback_outfit_name(now: NaiveDateTime) -> String {
    format!("Outfit {}", now.format("%b %d"))
}

/// Tidy a generated name; `None` if nothing usable is left.
#[must_use]
pub fn clean_outfit_name(raw: &str) -> Option<String> {
    let name = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim();
    (!name.is_empty()).then(|| name.to_string())
}
