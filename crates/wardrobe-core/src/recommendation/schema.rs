//! Outfit response schema
//!
//! The shape the model is told to reply in. Parsing distinguishes a reply
//! that isn't JSON at all from JSON in the wrong shape.

use crate::error::GenerationFailure;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A selected item id with the model's reason
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPick {
    /// Item id from the candidate list
    pub id: i64,
    /// Why it was picked
    #[serde(default)]
    pub reason: String,
}

/// The primary outfit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitSelection {
    /// Upper-body pick
    #[serde(default)]
    pub top: Option<ItemPick>,
    /// Lower-body pick
    #[serde(default)]
    pub bottom: Option<ItemPick>,
    /// Extra layers or accessories
    #[serde(default)]
    pub additional: Vec<ItemPick>,
    /// One or two sentence summary
    #[serde(default)]
    pub description: String,
    /// Practical styling tips
    #[serde(default)]
    pub styling_tips: String,
}

/// An alternative top/bottom pairing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativePick {
    /// Alternative top id
    #[serde(default)]
    pub top_id: Option<i64>,
    /// Alternative bottom id
    #[serde(default)]
    pub bottom_id: Option<i64>,
    /// Why it works
    #[serde(default)]
    pub reason: String,
}

/// How well the wardrobe fits the request
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    /// Strong match
    High,
    /// Reasonable match
    #[default]
    Medium,
    /// Closest available option
    Low,
}

impl Confidence {
    /// Parse a label leniently; anything unrecognized is `Medium`.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let label = label.trim().to_ascii_lowercase();
        if label.starts_with("high") {
            Self::High
        } else if label.starts_with("low") {
            Self::Low
        } else {
            Self::Medium
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        })
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(label.as_deref().map(Self::from_label).unwrap_or_default())
    }
}

/// A parsed model reply
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitPlan {
    /// The primary outfit
    pub outfit: OutfitSelection,
    /// Other pairings worth considering
    #[serde(default)]
    pub alternatives: Vec<AlternativePick>,
    /// Confidence label
    #[serde(default)]
    pub confidence: Confidence,
}

/// Parse model content into an [`OutfitPlan`].
///
/// # Errors
/// `MalformedResponse` when the content isn't JSON, `SchemaViolation` when
/// it is JSON but not an outfit plan
pub fn parse_outfit_plan(content: &str) -> Result<OutfitPlan, GenerationFailure> {
    let value: serde_json::Value = serde_json::from_str(content.trim())
        .map_err(|e| GenerationFailure::MalformedResponse(e.to_string()))?;
    serde_json::from_value(value).map_err(|e| GenerationFailure::SchemaViolation(e.to_string()))
}
