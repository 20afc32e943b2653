//! Tests for cost module

use super::*;
use crate::completion::TokenUsage;
use crate::error::Error;

#[test]
fn test_model_rates_calculation() {
    let rates = ModelRates::new(0.0005, 0.0015);

    // 1K tokens each
    let cost = rates.calculate_cost(1000, 1000);
    assert!((cost - 0.002).abs() < 1e-12);

    // Zero tokens cost nothing
    assert_eq!(rates.calculate_cost(0, 0), 0.0);
}

#[test]
fn test_default_table_has_openai_chat_models() {
    let table = RateTable::default();

    assert_eq!(
        table.models(),
        vec!["gpt-3.5-turbo", "gpt-4", "gpt-4-turbo", "gpt-4o-mini"]
    );
    assert_eq!(table.default_model(), Some(DEFAULT_MODEL));
    assert_eq!(
        table.exact("gpt-4"),
        Some(ModelRates::new(0.03, 0.06))
    );
}

#[test]
fn test_estimate_low_cost_model() {
    let estimator = CostEstimator::default();

    let cost = estimator.estimate("gpt-3.5-turbo", 1000, 1000).unwrap();
    assert!((cost - 0.002).abs() < 1e-12);

    // 1200 prompt + 300 completion on gpt-4
    let cost = estimator.estimate("gpt-4", 1200, 300).unwrap();
    assert!((cost - (1.2 * 0.03 + 0.3 * 0.06)).abs() < 1e-12);
}

#[test]
fn test_unknown_model_uses_default_rates() {
    let estimator = CostEstimator::default();

    let unknown = estimator.estimate("some-new-model", 1000, 1000).unwrap();
    let default = estimator.estimate(DEFAULT_MODEL, 1000, 1000).unwrap();
    assert_eq!(unknown, default);
    assert!(estimator.ensure_priced("some-new-model").is_ok());
}

#[test]
fn test_unknown_model_without_default_is_an_error() {
    let table = RateTable::default().without_default_model();
    let estimator = CostEstimator::new(table);

    assert!(matches!(
        estimator.estimate("some-new-model", 10, 10),
        Err(Error::UnknownModel(model)) if model == "some-new-model"
    ));
    assert!(estimator.ensure_priced("some-new-model").is_err());
    assert!(estimator.ensure_priced("gpt-4").is_ok());
}

#[test]
fn test_default_designation_without_entry_does_not_price() {
    let table = RateTable::empty()
        .with_rates("house-model", ModelRates::new(0.001, 0.002))
        .with_default_model("missing-model");

    assert!(table.default_rates().is_none());
    assert!(table.rates_for("other").is_none());
    assert!(table.rates_for("house-model").is_some());
}

#[test]
fn test_cost_record_from_usage() {
    let estimator = CostEstimator::default();
    let record = estimator
        .record("gpt-3.5-turbo", &TokenUsage::new(2000, 500))
        .unwrap();

    assert_eq!(record.model_id, "gpt-3.5-turbo");
    assert_eq!(record.input_tokens, 2000);
    assert_eq!(record.output_tokens, 500);
    assert_eq!(record.total_tokens(), 2500);
    assert!((record.cost - (2.0 * 0.0005 + 0.5 * 0.0015)).abs() < 1e-12);
}

#[test]
fn test_estimate_is_deterministic() {
    let estimator = CostEstimator::default();
    let a = estimator.estimate("gpt-4-turbo", 777, 333).unwrap();
    let b = estimator.estimate("gpt-4-turbo", 777, 333).unwrap();
    assert_eq!(a, b);
}
