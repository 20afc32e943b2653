//! Gate decisions

use serde::Serialize;
use std::fmt;

/// Why a request was refused. Exactly one is reported per denial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DenialReason {
    /// Monthly spend reached the budget
    MonthlyBudgetExceeded {
        /// Configured monthly budget (USD)
        budget: f64,
    },
    /// Daily request count reached the ceiling
    DailyLimitExceeded {
        /// Configured daily ceiling
        limit: u32,
    },
    /// Hourly request count reached the ceiling
    HourlyLimitExceeded {
        /// Configured hourly ceiling
        limit: u32,
    },
}

impl DenialReason {
    /// Stable machine-readable code
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::MonthlyBudgetExceeded { .. } => "monthly_budget_exceeded",
            Self::DailyLimitExceeded { .. } => "daily_limit_exceeded",
            Self::HourlyLimitExceeded { .. } => "hourly_limit_exceeded",
        }
    }
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MonthlyBudgetExceeded { budget } => {
                write!(f, "Monthly budget limit reached (${budget:.2})")
            }
            Self::DailyLimitExceeded { limit } => {
                write!(f, "Daily request limit reached ({limit} requests)")
            }
            Self::HourlyLimitExceeded { limit } => {
                write!(f, "Hourly request limit reached ({limit} requests)")
            }
        }
    }
}

/// Result of asking the tracker whether a call may be made now
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RequestOutcome {
    /// The call may proceed
    Allowed,
    /// The call must not be dispatched
    Denied(DenialReason),
}

impl RequestOutcome {
    /// Whether the call may proceed
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// The denial reason, if denied
    #[must_use]
    pub fn denial(&self) -> Option<DenialReason> {
        match self {
            Self::Allowed => None,
            Self::Denied(reason) => Some(*reason),
        }
    }

    /// Human-readable reason; empty when allowed
    #[must_use]
    pub fn reason(&self) -> String {
        self.denial().map(|r| r.to_string()).unwrap_or_default()
    }
}
