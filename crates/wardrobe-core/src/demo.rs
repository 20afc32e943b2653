//! Demo recommender
//!
//! A deterministic, zero-cost stand-in for [`LlmOrchestrator`](crate::LlmOrchestrator).
//! Picks the first top and first bottom from the candidates and fills in
//! fixed text. Never touches a usage tracker.

use crate::engine::{EngineMode, RecommendationEngine};
use crate::error::RecommendationError;
use crate::recommendation::{
    fallback_outfit_name, Confidence, ItemPick, OutfitPlan, OutfitSelection, Recommendation,
    RecommendationMetadata,
};
use crate::wardrobe::{ClothingItem, Role};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;
use wardrobe_llm::{Clock, SystemClock, UsageSnapshot};

/// Model id reported on demo recommendations
pub const DEMO_MODEL: &str = "demo-mode";

/// Note attached to demo recommendations
pub const DEMO_NOTE: &str =
    "This is a demo response. Add OpenAI credits to use real AI recommendations.";

const DEMO_LIMIT: u32 = 999;
const DEMO_BUDGET_USD: f64 = 5.0;

/// Zero-cost recommendation engine
pub struct DemoRecommender {
    clock: Arc<dyn Clock>,
}

impl Default for DemoRecommender {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoRecommender {
    /// Create a demo recommender on the system clock
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create a demo recommender on an injected clock (used for fallback names)
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    fn first_with_role(candidates: &[ClothingItem], role: Role) -> Option<&ClothingItem> {
        candidates.iter().find(|item| item.role() == role)
    }

    fn top_reason(item: &ClothingItem) -> String {
        let style = item.attributes.style.as_deref().unwrap_or("casual");
        let kind = item.attributes.clothing_type.as_deref().unwrap_or("top");
        format!("Perfect {style} {kind} for this occasion")
    }

    fn bottom_reason(item: &ClothingItem) -> String {
        let kind = item.attributes.clothing_type.as_deref().unwrap_or("bottom");
        match item.attributes.color.as_deref().filter(|c| !c.is_empty()) {
            Some(color) => format!("Comfortable {color} {kind}"),
            None => format!("Comfortable {kind}"),
        }
    }

    /// Build the fixed-template recommendation. Always succeeds.
    #[must_use]
    pub fn recommend(&self, user_text: &str, candidates: &[ClothingItem]) -> Recommendation {
        info!(request = %user_text, items = candidates.len(), "[DEMO MODE] Generating outfit");

        let top = Self::first_with_role(candidates, Role::Top).map(|item| ItemPick {
            id: item.id,
            reason: Self::top_reason(item),
        });
        let bottom = Self::first_with_role(candidates, Role::Bottom).map(|item| ItemPick {
            id: item.id,
            reason: Self::bottom_reason(item),
        });

        Recommendation {
            plan: OutfitPlan {
                outfit: OutfitSelection {
                    top,
                    bottom,
                    additional: Vec::new(),
                    description: format!("A great outfit for {user_text}"),
                    styling_tips: "Keep it simple and comfortable. Accessorize minimally."
                        .to_string(),
                },
                alternatives: Vec::new(),
                confidence: Confidence::Medium,
            },
            metadata: RecommendationMetadata {
                model: DEMO_MODEL.to_string(),
                cost_usd: 0.0,
                tokens_used: 0,
                usage_stats: None,
                note: Some(DEMO_NOTE.to_string()),
            },
        }
    }

    /// Fixed snapshot; demo mode has no ledger
    #[must_use]
    pub fn get_usage_stats(&self) -> UsageSnapshot {
        UsageSnapshot {
            daily_requests: 0,
            daily_limit: DEMO_LIMIT,
            hourly_requests: 0,
            hourly_limit: DEMO_LIMIT,
            monthly_cost_usd: 0.0,
            monthly_budget_usd: DEMO_BUDGET_USD,
            remaining_budget_usd: DEMO_BUDGET_USD,
            can_make_request: true,
            demo_mode: true,
        }
    }
}

#[async_trait]
impl RecommendationEngine for DemoRecommender {
    fn mode(&self) -> EngineMode {
        EngineMode::Demo
    }

    async fn request_recommendation(
        &self,
        user_text: &str,
        candidates: &[ClothingItem],
    ) -> Result<Recommendation, RecommendationError> {
        Ok(self.recommend(user_text, candidates))
    }

    fn usage_stats(&self) -> UsageSnapshot {
        self.get_usage_stats()
    }

    async fn suggest_outfit_name(&self, _original_request: &str, _description: &str) -> String {
        fallback_outfit_name(self.clock.now())
    }
}
