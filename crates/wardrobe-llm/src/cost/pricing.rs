//! Model Pricing - LLM cost information
//!
//! Rates are USD per 1K tokens, looked up by exact model id. A table may
//! designate a default model whose rates apply to unrecognized ids.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================================================
// Constants (per 1K tokens, USD)
// ============================================================================

/// Low-cost chat model used when nothing else is configured
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// GPT-3.5 Turbo input cost per 1K tokens
pub const GPT35_TURBO_INPUT_COST: f64 = 0.0005;
/// GPT-3.5 Turbo output cost per 1K tokens
pub const GPT35_TURBO_OUTPUT_COST: f64 = 0.0015;
/// GPT-4 input cost per 1K tokens
pub const GPT4_INPUT_COST: f64 = 0.03;
/// GPT-4 output cost per 1K tokens
pub const GPT4_OUTPUT_COST: f64 = 0.06;
/// GPT-4 Turbo input cost per 1K tokens
pub const GPT4_TURBO_INPUT_COST: f64 = 0.01;
/// GPT-4 Turbo output cost per 1K tokens
pub const GPT4_TURBO_OUTPUT_COST: f64 = 0.03;
/// GPT-4o-mini input cost per 1K tokens
pub const GPT4O_MINI_INPUT_COST: f64 = 0.000_15;
/// GPT-4o-mini output cost per 1K tokens
pub const GPT4O_MINI_OUTPUT_COST: f64 = 0.000_6;

// ============================================================================
// Rates
// ============================================================================

/// Input/output rates for one model (USD per 1K tokens)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelRates {
    /// Cost per 1K input (prompt) tokens
    pub input_per_1k: f64,
    /// Cost per 1K output (completion) tokens
    pub output_per_1k: f64,
}

impl ModelRates {
    /// Create a rate pair
    #[must_use]
    pub const fn new(input_per_1k: f64, output_per_1k: f64) -> Self {
        Self {
            input_per_1k,
            output_per_1k,
        }
    }

    /// Calculate cost for given token counts
    #[must_use]
    pub fn calculate_cost(&self, input_tokens: u32, output_tokens: u32) -> f64 {
        let input_cost = (f64::from(input_tokens) / 1000.0) * self.input_per_1k;
        let output_cost = (f64::from(output_tokens) / 1000.0) * self.output_per_1k;
        input_cost + output_cost
    }
}

/// Static mapping from model id to rates, with an optional fallback entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    rates: HashMap<String, ModelRates>,
    default_model: Option<String>,
}

impl Default for RateTable {
    /// Built-in OpenAI chat rates with `gpt-3.5-turbo` as the fallback
    fn default() -> Self {
        Self::empty()
            .with_rates(
                "gpt-3.5-turbo",
                ModelRates::new(GPT35_TURBO_INPUT_COST, GPT35_TURBO_OUTPUT_COST),
            )
            .with_rates("gpt-4", ModelRates::new(GPT4_INPUT_COST, GPT4_OUTPUT_COST))
            .with_rates(
                "gpt-4-turbo",
                ModelRates::new(GPT4_TURBO_INPUT_COST, GPT4_TURBO_OUTPUT_COST),
            )
            .with_rates(
                "gpt-4o-mini",
                ModelRates::new(GPT4O_MINI_INPUT_COST, GPT4O_MINI_OUTPUT_COST),
            )
            .with_default_model(DEFAULT_MODEL)
    }
}

impl RateTable {
    /// A table with no entries and no fallback
    #[must_use]
    pub fn empty() -> Self {
        Self {
            rates: HashMap::new(),
            default_model: None,
        }
    }

    /// Add or replace the rates for a model
    #[must_use]
    pub fn with_rates(mut self, model: impl Into<String>, rates: ModelRates) -> Self {
        self.rates.insert(model.into(), rates);
        self
    }

    /// Designate the fallback model for unrecognized ids
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = Some(model.into());
        self
    }

    /// Remove the fallback designation
    #[must_use]
    pub fn without_default_model(mut self) -> Self {
        self.default_model = None;
        self
    }

    /// Rates registered for exactly this model id
    #[must_use]
    pub fn exact(&self, model: &str) -> Option<ModelRates> {
        self.rates.get(model).copied()
    }

    /// Rates of the designated default model, if it has an entry
    #[must_use]
    pub fn default_rates(&self) -> Option<ModelRates> {
        self.default_model
            .as_deref()
            .and_then(|model| self.exact(model))
    }

    /// Rates for `model`, falling back to the default entry
    #[must_use]
    pub fn rates_for(&self, model: &str) -> Option<ModelRates> {
        self.exact(model).or_else(|| self.default_rates())
    }

    /// The designated default model id
    #[must_use]
    pub fn default_model(&self) -> Option<&str> {
        self.default_model.as_deref()
    }

    /// Known model ids, sorted
    #[must_use]
    pub fn models(&self) -> Vec<&str> {
        let mut models: Vec<&str> = self.rates.keys().map(String::as_str).collect();
        models.sort_unstable();
        models
    }
}
