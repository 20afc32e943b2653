//! Usage limits

use crate::error::{Error, Result};
use serde::Serialize;

/// Default daily request ceiling
pub const DEFAULT_MAX_REQUESTS_PER_DAY: u32 = 230;

/// Default hourly request ceiling
pub const DEFAULT_MAX_REQUESTS_PER_HOUR: u32 = 10;

/// Default monthly spend ceiling (USD)
pub const DEFAULT_MONTHLY_BUDGET_USD: f64 = 5.00;

/// Immutable limits, fixed when the tracker is built
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UsageLimits {
    max_daily: u32,
    max_hourly: u32,
    monthly_budget: f64,
}

impl Default for UsageLimits {
    fn default() -> Self {
        Self {
            max_daily: DEFAULT_MAX_REQUESTS_PER_DAY,
            max_hourly: DEFAULT_MAX_REQUESTS_PER_HOUR,
            monthly_budget: DEFAULT_MONTHLY_BUDGET_USD,
        }
    }
}

impl UsageLimits {
    /// Build limits; every value must be positive.
    ///
    /// # Errors
    /// Returns `Error::InvalidLimits` for zero counts or a non-positive or
    /// non-finite budget
    pub fn new(max_daily: u32, max_hourly: u32, monthly_budget: f64) -> Result<Self> {
        if max_daily == 0 {
            return Err(Error::InvalidLimits("max_daily must be positive".to_string()));
        }
        if max_hourly == 0 {
            return Err(Error::InvalidLimits("max_hourly must be positive".to_string()));
        }
        if !monthly_budget.is_finite() || monthly_budget <= 0.0 {
            return Err(Error::InvalidLimits(format!(
                "monthly_budget must be a positive amount, got {monthly_budget}"
            )));
        }
        Ok(Self {
            max_daily,
            max_hourly,
            monthly_budget,
        })
    }

    /// Requests allowed per calendar day
    #[must_use]
    pub fn max_daily(&self) -> u32 {
        self.max_daily
    }

    /// Requests allowed per calendar hour
    #[must_use]
    pub fn max_hourly(&self) -> u32 {
        self.max_hourly
    }

    /// Spend allowed per calendar month (USD)
    #[must_use]
    pub fn monthly_budget(&self) -> f64 {
        self.monthly_budget
    }
}
