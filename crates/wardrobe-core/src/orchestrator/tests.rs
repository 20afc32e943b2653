//! Tests for the orchestrator module

use super::*;
use crate::wardrobe::{Category, ItemAttributes};
use chrono::{NaiveDate, NaiveDateTime};
use wardrobe_llm::{
    Clock, CompletionResponse, DenialReason, Error as LlmError, ManualClock, MessageRole,
    MockProvider, ModelRates, RateTable, ResponseFormat, TokenUsage, UsageLimits,
};

const TEST_MODEL: &str = "test-model";

const VALID_PLAN: &str = r#"{
    "outfit": {
        "top": {"id": 1, "reason": "Crisp and light"},
        "bottom": {"id": 2, "reason": "Neutral base"},
        "description": "Easy Friday look.",
        "styling_tips": "Tuck the shirt loosely."
    },
    "alternatives": [],
    "confidence": "high"
}"#;

fn start() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 14)
        .unwrap()
        .and_hms_opt(10, 15, 0)
        .unwrap()
}

/// $0.40 per 1000 prompt tokens, completion tokens free
fn test_estimator() -> CostEstimator {
    CostEstimator::new(
        RateTable::empty()
            .with_rates(TEST_MODEL, ModelRates::new(0.4, 0.0))
            .with_default_model(TEST_MODEL),
    )
}

fn wardrobe() -> Vec<ClothingItem> {
    vec![
        ClothingItem::new(1, Category::Shirt).with_attributes(ItemAttributes {
            color: Some("white".into()),
            ..Default::default()
        }),
        ClothingItem::new(2, Category::Pants),
    ]
}

struct Fixture {
    provider: MockProvider,
    tracker: Arc<UsageTracker>,
    clock: Arc<ManualClock>,
    orchestrator: LlmOrchestrator,
}

fn fixture(limits: UsageLimits) -> Fixture {
    let provider = MockProvider::new();
    let clock = Arc::new(ManualClock::new(start()));
    let tracker = Arc::new(UsageTracker::with_clock(limits, clock.clone()));
    let orchestrator = LlmOrchestrator::new(
        Arc::new(provider.clone()),
        TEST_MODEL,
        test_estimator(),
        tracker.clone(),
    )
    .unwrap();
    Fixture {
        provider,
        tracker,
        clock,
        orchestrator,
    }
}

fn reply(content: &str, prompt_tokens: u32) -> CompletionResponse {
    CompletionResponse::new(content, TEST_MODEL, TokenUsage::new(prompt_tokens, 0))
}

#[test]
fn test_unpriced_model_rejected() {
    let tracker = Arc::new(UsageTracker::new(UsageLimits::default()));
    let estimator = CostEstimator::new(RateTable::empty());
    let result = LlmOrchestrator::new(Arc::new(MockProvider::new()), "gpt-9", estimator, tracker);
    assert!(matches!(result, Err(LlmError::UnknownModel(_))));
}

#[tokio::test]
async fn test_successful_recommendation_records_cost() {
    let f = fixture(UsageLimits::default());
    f.provider.add_response(reply(VALID_PLAN, 1000));

    let rec = f
        .orchestrator
        .request_recommendation("casual friday", &wardrobe())
        .await
        .unwrap();

    assert_eq!(rec.plan.outfit.top.as_ref().unwrap().id, 1);
    assert_eq!(rec.metadata.model, TEST_MODEL);
    assert_eq!(rec.metadata.cost_usd, 0.4);
    assert_eq!(rec.metadata.tokens_used, 1000);

    let stats = rec.metadata.usage_stats.unwrap();
    assert_eq!(stats.daily_requests, 1);
    assert_eq!(stats.hourly_requests, 1);
    assert_eq!(stats.monthly_cost_usd, 0.4);
}

#[tokio::test]
async fn test_request_shape() {
    let f = fixture(UsageLimits::default());
    f.provider.add_response(reply(VALID_PLAN, 10));

    f.orchestrator
        .request_recommendation("date night", &wardrobe())
        .await
        .unwrap();

    let request = f.provider.last_request().unwrap();
    assert_eq!(request.model, TEST_MODEL);
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, MessageRole::System);
    assert_eq!(request.messages[0].content, SYSTEM_INSTRUCTION);
    assert!(request.messages[1].content.contains("USER REQUEST: \"date night\""));
    assert!(request.messages[1].content.contains("[SHIRT] ID:1 - Color: white"));
    assert_eq!(request.temperature, Some(DEFAULT_TEMPERATURE));
    assert_eq!(request.max_tokens, Some(DEFAULT_MAX_OUTPUT_TOKENS));
    assert_eq!(request.response_format, ResponseFormat::JsonObject);
}

#[tokio::test]
async fn test_custom_generation_settings() {
    let f = fixture(UsageLimits::default());
    let orchestrator = f.orchestrator.with_settings(GenerationSettings {
        temperature: 0.2,
        max_output_tokens: 300,
    });
    f.provider.add_response(reply(VALID_PLAN, 10));

    orchestrator
        .request_recommendation("gym", &wardrobe())
        .await
        .unwrap();

    let request = f.provider.last_request().unwrap();
    assert_eq!(request.temperature, Some(0.2));
    assert_eq!(request.max_tokens, Some(300));
}

#[tokio::test]
async fn test_daily_limit_scenario() {
    let f = fixture(UsageLimits::new(2, 10, 1.00).unwrap());
    f.provider.add_response(reply(VALID_PLAN, 1000));
    f.provider.add_response(reply(VALID_PLAN, 1000));

    for _ in 0..2 {
        f.orchestrator
            .request_recommendation("work", &wardrobe())
            .await
            .unwrap();
    }
    assert!((f.tracker.window().monthly_cost() - 0.8).abs() < 1e-9);

    let err = f
        .orchestrator
        .request_recommendation("work", &wardrobe())
        .await
        .unwrap_err();

    assert_eq!(
        err,
        RecommendationError::RateLimitExceeded(DenialReason::DailyLimitExceeded { limit: 2 })
    );
    assert_eq!(f.provider.call_count(), 2);
    assert_eq!(f.tracker.window().daily_count(), 2);
}

#[tokio::test]
async fn test_budget_denial_skips_provider() {
    let f = fixture(UsageLimits::new(230, 10, 0.5).unwrap());
    f.tracker.record_request(0.5);

    let err = f
        .orchestrator
        .request_recommendation("anything", &wardrobe())
        .await
        .unwrap_err();

    assert!(err.is_rate_limited());
    assert_eq!(
        err.to_string(),
        "Rate limit exceeded: Monthly budget limit reached ($0.50)"
    );
    assert_eq!(f.provider.call_count(), 0);
    assert_eq!(f.tracker.window().daily_count(), 1);
}

#[tokio::test]
async fn test_transport_failure_records_nothing() {
    let f = fixture(UsageLimits::default());
    f.provider.add_error(LlmError::Network("connection reset".to_string()));

    let err = f
        .orchestrator
        .request_recommendation("hike", &wardrobe())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RecommendationError::GenerationFailed(GenerationFailure::Transport(_))
    ));
    assert_eq!(err.status_code(), 500);
    assert_eq!(f.tracker.window().daily_count(), 0);
    assert_eq!(f.tracker.window().monthly_cost(), 0.0);
}

#[tokio::test]
async fn test_malformed_reply_still_records_cost() {
    let f = fixture(UsageLimits::default());
    f.provider.add_response(reply("I think the white shirt works.", 500));

    let err = f
        .orchestrator
        .request_recommendation("brunch", &wardrobe())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RecommendationError::GenerationFailed(GenerationFailure::MalformedResponse(_))
    ));
    let window = f.tracker.window();
    assert_eq!(window.daily_count(), 1);
    assert!((window.monthly_cost() - 0.2).abs() < 1e-9);
}

#[tokio::test]
async fn test_empty_reply_with_usage_records_cost() {
    let f = fixture(UsageLimits::default());
    f.provider.add_response(reply("", 1000));

    let err = f
        .orchestrator
        .request_recommendation("brunch", &wardrobe())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RecommendationError::GenerationFailed(GenerationFailure::MalformedResponse(_))
    ));
    let stats = f.orchestrator.get_usage_stats();
    assert_eq!(stats.daily_requests, 1);
    assert_eq!(stats.monthly_cost_usd, 0.4);
}

#[tokio::test]
async fn test_schema_violation_still_records_cost() {
    let f = fixture(UsageLimits::default());
    f.provider.add_response(reply(r#"{"shirt": 1}"#, 1000));

    let err = f
        .orchestrator
        .request_recommendation("brunch", &wardrobe())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        RecommendationError::GenerationFailed(GenerationFailure::SchemaViolation(_))
    ));
    assert!((f.tracker.window().monthly_cost() - 0.4).abs() < 1e-9);
}

#[tokio::test]
async fn test_missing_usage_records_zero_cost_call() {
    let f = fixture(UsageLimits::default());
    f.provider.add_response(CompletionResponse {
        content: VALID_PLAN.to_string(),
        usage: None,
        finish_reason: Some("stop".to_string()),
        model: TEST_MODEL.to_string(),
    });

    let rec = f
        .orchestrator
        .request_recommendation("errands", &wardrobe())
        .await
        .unwrap();

    assert_eq!(rec.metadata.cost_usd, 0.0);
    assert_eq!(rec.metadata.tokens_used, 0);
    assert_eq!(f.tracker.window().daily_count(), 1);
}

#[tokio::test]
async fn test_hourly_gate_reopens_next_hour() {
    let f = fixture(UsageLimits::new(230, 1, 5.0).unwrap());
    f.provider.add_response(reply(VALID_PLAN, 10));
    f.provider.add_response(reply(VALID_PLAN, 10));

    f.orchestrator
        .request_recommendation("a", &wardrobe())
        .await
        .unwrap();
    assert!(f
        .orchestrator
        .request_recommendation("b", &wardrobe())
        .await
        .unwrap_err()
        .is_rate_limited());

    f.clock.advance(chrono::Duration::hours(1));
    assert!(f
        .orchestrator
        .request_recommendation("c", &wardrobe())
        .await
        .is_ok());
    assert_eq!(f.provider.call_count(), 2);
}

#[tokio::test]
async fn test_suggest_outfit_name() {
    let f = fixture(UsageLimits::default());
    f.provider.add_response(reply("\"Summer Breeze\"", 100));

    let name = f
        .orchestrator
        .suggest_outfit_name("beach", "Linen shirt and shorts")
        .await;

    assert_eq!(name, "Summer Breeze");
    let request = f.provider.last_request().unwrap();
    assert_eq!(request.messages.len(), 1);
    assert_eq!(request.temperature, Some(0.8));
    assert_eq!(request.max_tokens, Some(20));
    assert_eq!(request.response_format, ResponseFormat::Text);
    assert_eq!(f.tracker.window().daily_count(), 1);
}

#[tokio::test]
async fn test_suggest_outfit_name_fallbacks() {
    let f = fixture(UsageLimits::new(230, 2, 5.0).unwrap());

    f.provider.add_error(LlmError::Api("boom".to_string()));
    let name = f.orchestrator.suggest_outfit_name("x", "y").await;
    assert_eq!(name, "Outfit Mar 14");
    assert_eq!(f.tracker.window().daily_count(), 0);

    f.provider.add_response(reply("  ", 10));
    assert_eq!(f.orchestrator.suggest_outfit_name("x", "y").await, "Outfit Mar 14");
    assert_eq!(f.tracker.window().daily_count(), 1);

    // Exhaust the hourly gate; naming must not dispatch
    f.tracker.record_request(0.0);
    let calls = f.provider.call_count();
    f.clock.set(f.clock.now() + chrono::Duration::minutes(5));
    assert_eq!(f.orchestrator.suggest_outfit_name("x", "y").await, "Outfit Mar 14");
    assert_eq!(f.provider.call_count(), calls);
}

#[tokio::test]
async fn test_engine_trait_dispatch() {
    let f = fixture(UsageLimits::default());
    let engine: &dyn RecommendationEngine = &f.orchestrator;
    assert_eq!(engine.mode(), EngineMode::Live);
    assert_eq!(engine.usage_stats().daily_limit, 230);
}
