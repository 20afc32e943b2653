//! Cost Estimation - per-model rates and token-based cost
//!
//! # Module Structure
//!
//! - `pricing`: Rate table (per 1K tokens) and built-in defaults
//! - `estimator`: CostEstimator and the CostRecord it produces

mod estimator;
mod pricing;

#[cfg(test)]
mod tests;

pub use estimator::{CostEstimator, CostRecord};
pub use pricing::{ModelRates, RateTable, DEFAULT_MODEL};
