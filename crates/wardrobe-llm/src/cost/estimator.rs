//! Cost Estimator
//!
//! Maps `(model, input tokens, output tokens)` to a dollar cost. Pure
//! lookup and arithmetic; no I/O, no shared state.

use super::pricing::RateTable;
use crate::completion::TokenUsage;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Cost of one completed call. In-memory only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostRecord {
    /// Model the call was billed against
    pub model_id: String,
    /// Prompt tokens
    pub input_tokens: u32,
    /// Completion tokens
    pub output_tokens: u32,
    /// Estimated cost (USD)
    pub cost: f64,
}

impl CostRecord {
    /// Total tokens consumed by the call
    #[must_use]
    pub fn total_tokens(&self) -> u32 {
        self.input_tokens.saturating_add(self.output_tokens)
    }
}

/// Token-based cost estimator over a static rate table
#[derive(Debug, Clone, Default)]
pub struct CostEstimator {
    table: RateTable,
}

impl CostEstimator {
    /// Create an estimator over `table`
    #[must_use]
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }

    /// The underlying rate table
    #[must_use]
    pub fn table(&self) -> &RateTable {
        &self.table
    }

    /// Check that `model` can be priced (exactly or via the default entry).
    ///
    /// # Errors
    /// Returns `Error::UnknownModel` if neither exists
    pub fn ensure_priced(&self, model: &str) -> Result<()> {
        self.table
            .rates_for(model)
            .map(|_| ())
            .ok_or_else(|| Error::UnknownModel(model.to_string()))
    }

    /// `(input/1000)*input_rate + (output/1000)*output_rate`
    ///
    /// # Errors
    /// Returns `Error::UnknownModel` if the model cannot be priced
    pub fn estimate(&self, model: &str, input_tokens: u32, output_tokens: u32) -> Result<f64> {
        let rates = self
            .table
            .rates_for(model)
            .ok_or_else(|| Error::UnknownModel(model.to_string()))?;
        Ok(rates.calculate_cost(input_tokens, output_tokens))
    }

    /// Price the usage reported by a completed call
    ///
    /// # Errors
    /// Returns `Error::UnknownModel` if the model cannot be priced
    pub fn record(&self, model: &str, usage: &TokenUsage) -> Result<CostRecord> {
        let cost = self.estimate(model, usage.prompt_tokens, usage.completion_tokens)?;
        Ok(CostRecord {
            model_id: model.to_string(),
            input_tokens: usage.prompt_tokens,
            output_tokens: usage.completion_tokens,
            cost,
        })
    }
}
