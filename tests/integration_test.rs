//! Integration tests for Wardrobe
//!
//! These tests verify the integration between crates:
//! - wardrobe-llm: usage tracker, cost estimation, mock provider
//! - wardrobe-core: inventory, recommender, orchestrator, demo engine

use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::io::Write;
use std::sync::Arc;

use wardrobe_core::{
    build_engine, build_live_engine, Category, EngineMode, EngineSettings, Error,
    InMemoryInventory, ItemFilter, NewItem, OutfitRecommender, RecommendationError,
};
use wardrobe_llm::{
    CompletionResponse, DenialReason, ManualClock, MockProvider, ModelRates, RateTable,
    TokenUsage,
};

const PLAN: &str = r#"{
    "outfit": {
        "top": {"id": 1, "reason": "Clean and simple"},
        "bottom": {"id": 2, "reason": "Goes with everything"},
        "description": "Relaxed office look.",
        "styling_tips": "Add a watch."
    },
    "alternatives": [{"top_id": 3, "bottom_id": 2, "reason": "Cooler days"}],
    "confidence": "high"
}"#;

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 5, 29)
        .unwrap()
        .and_hms_opt(23, 40, 0)
        .unwrap()
}

fn wardrobe_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"id": 1, "category": "shirt", "clothing_type": "oxford", "color": "white"}},
            {{"id": 2, "category": "pants", "clothing_type": "chinos", "color": "navy"}},
            {{"id": 3, "category": "hoodie", "color": "grey"}}
        ]"#
    )
    .unwrap();
    file
}

/// $0.40 per 1000 prompt tokens
fn settings(max_daily: u32, max_hourly: u32, budget: f64) -> EngineSettings {
    EngineSettings {
        model: "test-model".into(),
        max_requests_per_day: max_daily,
        max_requests_per_hour: max_hourly,
        monthly_budget_usd: budget,
        rates: RateTable::empty().with_rates("test-model", ModelRates::new(0.4, 0.0)),
        ..Default::default()
    }
}

fn reply() -> CompletionResponse {
    CompletionResponse::new(PLAN, "test-model", TokenUsage::new(1000, 0))
}

// ============================================================================
// Live path
// ============================================================================

#[tokio::test]
async fn test_inventory_to_tracker_end_to_end() {
    let file = wardrobe_file();
    let provider = MockProvider::new();
    provider.add_response(reply());
    let clock = Arc::new(ManualClock::new(start()));

    let engine = build_live_engine(
        &settings(230, 10, 5.0),
        Arc::new(provider.clone()),
        clock.clone(),
    )
    .unwrap();
    let tracker = engine.tracker().clone();

    let inventory = InMemoryInventory::from_json_file(file.path()).unwrap();
    let recommender = OutfitRecommender::new(Arc::new(inventory), Arc::new(engine));

    let suggestion = recommender
        .generate_outfit("office", &ItemFilter::default())
        .await
        .unwrap();
    let rec = suggestion.recommendation().unwrap();

    assert_eq!(rec.outfit.top.as_ref().unwrap().item.id, 1);
    assert_eq!(rec.outfit.bottom.as_ref().unwrap().item.id, 2);
    assert_eq!(rec.alternatives.len(), 1);
    assert_eq!(rec.metadata.cost_usd, 0.4);
    assert_eq!(recommender.get_usage_stats().daily_requests, 1);

    let prompt = &provider.last_request().unwrap().messages[1].content;
    assert!(prompt.contains("[HOODIE] ID:3 - Color: grey"));

    // Crossing midnight resets the day's count but keeps the month's spend
    clock.advance(Duration::minutes(30));
    let stats = tracker.get_usage_stats();
    assert_eq!(stats.daily_requests, 0);
    assert_eq!(stats.hourly_requests, 0);
    assert_eq!(stats.monthly_cost_usd, 0.4);
}

#[tokio::test]
async fn test_daily_limit_with_budget_headroom() {
    let file = wardrobe_file();
    let provider = MockProvider::new();
    provider.add_response(reply());
    provider.add_response(reply());

    let engine = build_live_engine(
        &settings(2, 10, 1.0),
        Arc::new(provider.clone()),
        Arc::new(ManualClock::new(start())),
    )
    .unwrap();
    let inventory = InMemoryInventory::from_json_file(file.path()).unwrap();
    let recommender = OutfitRecommender::new(Arc::new(inventory), Arc::new(engine));

    for _ in 0..2 {
        recommender
            .generate_outfit("office", &ItemFilter::default())
            .await
            .unwrap();
    }

    let stats = recommender.get_usage_stats();
    assert_eq!(stats.monthly_cost_usd, 0.8);
    assert!(!stats.can_make_request);

    let err = recommender
        .generate_outfit("office", &ItemFilter::default())
        .await
        .unwrap_err();
    match err {
        Error::Recommendation(RecommendationError::RateLimitExceeded(reason)) => {
            assert_eq!(reason, DenialReason::DailyLimitExceeded { limit: 2 });
        }
        other => panic!("expected daily limit denial, got {other:?}"),
    }
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn test_filtered_to_nothing_makes_no_call() {
    let file = wardrobe_file();
    let provider = MockProvider::new();
    let engine = build_live_engine(
        &settings(230, 10, 5.0),
        Arc::new(provider.clone()),
        Arc::new(ManualClock::new(start())),
    )
    .unwrap();
    let inventory = InMemoryInventory::from_json_file(file.path()).unwrap();
    let recommender = OutfitRecommender::new(Arc::new(inventory), Arc::new(engine));

    let filter = ItemFilter {
        category: Some(Category::Shorts),
        ..Default::default()
    };
    let suggestion = recommender.generate_outfit("beach", &filter).await.unwrap();

    assert!(!suggestion.is_fulfilled());
    assert_eq!(provider.call_count(), 0);
    assert_eq!(recommender.get_usage_stats().daily_requests, 0);
}

// ============================================================================
// Demo path
// ============================================================================

#[tokio::test]
async fn test_demo_engine_end_to_end() {
    let settings = EngineSettings {
        demo_mode: true,
        ..Default::default()
    };
    let engine = build_engine(&settings, None).unwrap();
    assert_eq!(engine.mode(), EngineMode::Demo);

    let inventory = InMemoryInventory::default();
    inventory
        .add_item(
            NewItem {
                name: Some("Plain tee".into()),
                category: Category::Shirt,
                image_path: "uploads/tee.png".into(),
            },
            None,
        )
        .await
        .unwrap();
    inventory
        .add_item(
            NewItem {
                name: None,
                category: Category::Pants,
                image_path: "uploads/jeans.png".into(),
            },
            None,
        )
        .await
        .unwrap();

    let recommender = OutfitRecommender::new(Arc::new(inventory), engine);
    let suggestion = recommender
        .generate_outfit("casual friday", &ItemFilter::default())
        .await
        .unwrap();

    let json = serde_json::to_value(&suggestion).unwrap();
    assert_eq!(json["request_fulfilled"], true);
    assert_eq!(json["outfit"]["top"]["item"]["id"], 1);
    assert_eq!(json["outfit"]["bottom"]["item"]["id"], 2);
    assert_eq!(json["metadata"]["cost_usd"], 0.0);
    assert_eq!(json["metadata"]["model"], "demo-mode");

    let stats = recommender.get_usage_stats();
    assert!(stats.can_make_request);
    assert!(stats.demo_mode);
}
