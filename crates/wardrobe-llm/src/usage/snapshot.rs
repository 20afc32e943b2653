//! Read-only usage report

use serde::{Deserialize, Serialize};

/// Point-in-time view of the ledger, safe to hand to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    /// Calls recorded today
    pub daily_requests: u32,
    /// Daily ceiling
    pub daily_limit: u32,
    /// Calls recorded this hour
    pub hourly_requests: u32,
    /// Hourly ceiling
    pub hourly_limit: u32,
    /// Spend this month (USD, rounded to 4 places)
    pub monthly_cost_usd: f64,
    /// Monthly budget (USD)
    pub monthly_budget_usd: f64,
    /// Budget left this month (USD, rounded to 4 places, never below zero)
    pub remaining_budget_usd: f64,
    /// Whether a call would be allowed right now
    pub can_make_request: bool,
    /// Set when the numbers come from the demo path, not a real ledger
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub demo_mode: bool,
}
