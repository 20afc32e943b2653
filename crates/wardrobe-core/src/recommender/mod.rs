//! Outfit recommender
//!
//! The caller-facing layer: pulls candidates from the inventory, hands them
//! to whichever engine is configured, and swaps the ids in the reply for
//! the full items. Ids the model made up are dropped here, with a warning.


use crate::engine::{EngineMode, RecommendationEngine};
use crate::error::Result;
use crate::recommendation::{Confidence, ItemPick, Recommendation, RecommendationMetadata};
use crate::wardrobe::{ClothingItem, InventoryStore, ItemFilter};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};
use wardrobe_llm::UsageSnapshot;

/// An item chosen for the outfit, with the reason it was chosen
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectedItem {
    /// The full item
    pub item: ClothingItem,
    /// Why it was picked
    pub reason: String,
}

/// The primary outfit with full items
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnrichedOutfit {
    /// Upper-body item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<SelectedItem>,
    /// Lower-body item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<SelectedItem>,
    /// Extra items
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional: Vec<SelectedItem>,
    /// Summary
    pub description: String,
    /// Styling tips
    pub styling_tips: String,
}

/// An alternative pairing with full items
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedAlternative {
    /// Alternative top
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<ClothingItem>,
    /// Alternative bottom
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<ClothingItem>,
    /// Why it works
    pub reason: String,
}

/// A fulfilled suggestion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnrichedRecommendation {
    /// Always `true`
    pub request_fulfilled: bool,
    /// The outfit
    pub outfit: EnrichedOutfit,
    /// Alternatives with at least one resolvable item
    pub alternatives: Vec<EnrichedAlternative>,
    /// Confidence label
    pub confidence: Confidence,
    /// Model, cost and usage
    pub metadata: RecommendationMetadata,
}

/// Result of asking for an outfit
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutfitSuggestion {
    /// An outfit was produced
    Fulfilled(Box<EnrichedRecommendation>),
    /// Nothing to choose from; no model call was made
    Unfulfilled {
        /// Always `false`
        request_fulfilled: bool,
        /// Short error label
        error: String,
        /// What the user should do
        message: String,
    },
}

impl OutfitSuggestion {
    fn empty_wardrobe() -> Self {
        Self::Unfulfilled {
            request_fulfilled: false,
            error: "No items in wardrobe".to_string(),
            message: "Please add some clothing items to your wardrobe first.".to_string(),
        }
    }

    /// Whether an outfit was produced
    #[must_use]
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Self::Fulfilled(_))
    }

    /// The recommendation, if fulfilled
    #[must_use]
    pub fn recommendation(&self) -> Option<&EnrichedRecommendation> {
        match self {
            Self::Fulfilled(rec) => Some(&**rec),
            Self::Unfulfilled { .. } => None,
        }
    }
}

/// Resolve an id against the candidate set, warning on misses.
fn resolve<'a>(
    lookup: &HashMap<i64, &'a ClothingItem>,
    id: i64,
    slot: &str,
) -> Option<&'a ClothingItem> {
    let found = lookup.get(&id).copied();
    if found.is_none() {
        warn!(id, slot, "Model referenced an item not in the wardrobe, dropping it");
    }
    found
}

fn select(
    lookup: &HashMap<i64, &ClothingItem>,
    pick: &ItemPick,
    slot: &str,
) -> Option<SelectedItem> {
    resolve(lookup, pick.id, slot).map(|item| SelectedItem {
        item: item.clone(),
        reason: pick.reason.clone(),
    })
}

/// Replace ids with full items from `candidates`.
#[must_use]
pub fn enrich(
    recommendation: Recommendation,
    candidates: &[ClothingItem],
) -> EnrichedRecommendation {
    let lookup: HashMap<i64, &ClothingItem> = candidates.iter().map(|i| (i.id, i)).collect();
    let Recommendation { plan, metadata } = recommendation;
    let outfit = plan.outfit;

    let enriched_outfit = EnrichedOutfit {
        top: outfit.top.as_ref().and_then(|p| select(&lookup, p, "top")),
        bottom: outfit.bottom.as_ref().and_then(|p| select(&lookup, p, "bottom")),
        additional: outfit
            .additional
            .iter()
            .filter_map(|p| select(&lookup, p, "additional"))
            .collect(),
        description: outfit.description,
        styling_tips: outfit.styling_tips,
    };

    let alternatives = plan
        .alternatives
        .into_iter()
        .filter_map(|alt| {
            let top = alt
                .top_id
                .and_then(|id| resolve(&lookup, id, "alternative_top"))
                .cloned();
            let bottom = alt
                .bottom_id
                .and_then(|id| resolve(&lookup, id, "alternative_bottom"))
                .cloned();
            (top.is_some() || bottom.is_some()).then_some(EnrichedAlternative {
                top,
                bottom,
                reason: alt.reason,
            })
        })
        .collect();

    EnrichedRecommendation {
        request_fulfilled: true,
        outfit: enriched_outfit,
        alternatives,
        confidence: plan.confidence,
        metadata,
    }
}

/// Inventory-backed front door for outfit requests
pub struct OutfitRecommender {
    inventory: Arc<dyn InventoryStore>,
    engine: Arc<dyn RecommendationEngine>,
}

impl OutfitRecommender {
    /// Create a recommender over `inventory` using `engine`
    #[must_use]
    pub fn new(inventory: Arc<dyn InventoryStore>, engine: Arc<dyn RecommendationEngine>) -> Self {
        Self { inventory, engine }
    }

    /// Which engine is serving requests
    #[must_use]
    pub fn mode(&self) -> EngineMode {
        self.engine.mode()
    }

    /// Suggest an outfit for `user_text` from items matching `filter`.
    ///
    /// # Errors
    /// Inventory failures, and any denial or failure from the engine
    pub async fn generate_outfit(
        &self,
        user_text: &str,
        filter: &ItemFilter,
    ) -> Result<OutfitSuggestion> {
        let candidates = self.inventory.list_items(filter).await?;
        if candidates.is_empty() {
            info!(request = %user_text, "No wardrobe items match, skipping generation");
            return Ok(OutfitSuggestion::empty_wardrobe());
        }

        info!(
            items = candidates.len(),
            mode = %self.engine.mode(),
            "Generating outfit from wardrobe items"
        );

        let recommendation = self
            .engine
            .request_recommendation(user_text, &candidates)
            .await?;

        info!(request = %user_text, "Outfit generated successfully");
        Ok(OutfitSuggestion::Fulfilled(Box::new(enrich(recommendation, &candidates))))
    }

    /// Usage snapshot from the engine
    #[must_use]
    pub fn get_usage_stats(&self) -> UsageSnapshot {
        self.engine.usage_stats()
    }

    /// Name an outfit
    pub async fn name_outfit(&self, original_request: &str, description: &str) -> String {
        self.engine
            .suggest_outfit_name(original_request, description)
            .await
    }
}
