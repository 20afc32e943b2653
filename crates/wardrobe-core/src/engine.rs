//! Recommendation engine contract
//!
//! The live orchestrator and the demo recommender both implement
//! [`RecommendationEngine`], so callers hold one `Arc<dyn RecommendationEngine>`
//! and never branch on mode.

use crate::error::RecommendationError;
use crate::recommendation::Recommendation;
use crate::wardrobe::ClothingItem;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use wardrobe_llm::UsageSnapshot;

/// Which implementation is serving requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineMode {
    /// Real model calls under the usage budget
    Live,
    /// Local, zero-cost stand-in
    Demo,
}

impl fmt::Display for EngineMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Live => write!(f, "live"),
            Self::Demo => write!(f, "demo"),
        }
    }
}

/// Turns a request plus candidate items into one structured recommendation
#[async_trait]
pub trait RecommendationEngine: Send + Sync {
    /// Which implementation this is
    fn mode(&self) -> EngineMode;

    /// Produce a recommendation for `user_text` from `candidates`
    async fn request_recommendation(
        &self,
        user_text: &str,
        candidates: &[ClothingItem],
    ) -> Result<Recommendation, RecommendationError>;

    /// Current usage snapshot
    fn usage_stats(&self) -> UsageSnapshot;

    /// A short name for a chosen outfit; never fails
    async fn suggest_outfit_name(&self, original_request: &str, description: &str) -> String;
}
