//! Wardrobe Core - Outfit recommendation under a usage budget
//!
//! This crate provides the wardrobe domain and the recommendation flow:
//! - Wardrobe: clothing items, attribute tags, inventory store
//! - Recommendation: prompt builder, response schema, result types
//! - Orchestrator: gated, cost-accounted model calls
//! - Demo: zero-cost local stand-in satisfying the same contract
//! - Recommender: inventory lookup and enrichment for callers

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bootstrap;
pub mod demo;
pub mod engine;
pub mod error;
pub mod orchestrator;
pub mod recommendation;
pub mod recommender;
pub mod wardrobe;

pub use bootstrap::{build_engine, build_live_engine, EngineSettings};
pub use demo::DemoRecommender;
pub use engine::{EngineMode, RecommendationEngine};
pub use error::{ConfigError, Error, GenerationFailure, RecommendationError, Result};
pub use orchestrator::{GenerationSettings, LlmOrchestrator};
pub use recommendation::{
    AlternativePick, Confidence, ItemPick, OutfitPlan, OutfitSelection, Recommendation,
    RecommendationMetadata,
};
pub use recommender::{
    enrich, EnrichedAlternative, EnrichedOutfit, EnrichedRecommendation, OutfitRecommender,
    OutfitSuggestion, SelectedItem,
};
pub use wardrobe::{
    tag_or_none, Attribute, AttributeTag, AttributeTagger, Category, ClothingItem,
    InMemoryInventory, InventoryStore, ItemAttributes, ItemFilter, NewItem, Role, TagSet,
};
