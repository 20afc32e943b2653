//! Usage Tracker - the process-wide ledger
//!
//! Owned explicitly by whoever hosts the service and shared by handle
//! (`Arc<UsageTracker>`); there is no global instance.

use super::clock::{Clock, SystemClock};
use super::limits::UsageLimits;
use super::outcome::{DenialReason, RequestOutcome};
use super::snapshot::UsageSnapshot;
use super::window::UsageWindow;
use crate::util::round_to;
use chrono::NaiveDateTime;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};

/// Decide a request against a window that has already been rolled forward.
///
/// Precedence is fixed: monthly budget, then daily, then hourly.
fn evaluate(window: &UsageWindow, limits: &UsageLimits) -> RequestOutcome {
    if window.monthly_cost() >= limits.monthly_budget() {
        return RequestOutcome::Denied(DenialReason::MonthlyBudgetExceeded {
            budget: limits.monthly_budget(),
        });
    }
    if window.daily_count() >= limits.max_daily() {
        return RequestOutcome::Denied(DenialReason::DailyLimitExceeded {
            limit: limits.max_daily(),
        });
    }
    if window.hourly_count() >= limits.max_hourly() {
        return RequestOutcome::Denied(DenialReason::HourlyLimitExceeded {
            limit: limits.max_hourly(),
        });
    }
    RequestOutcome::Allowed
}

/// Rolling hourly/daily request counters and a monthly cost ceiling
pub struct UsageTracker {
    limits: UsageLimits,
    window: Mutex<UsageWindow>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for UsageTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UsageTracker")
            .field("limits", &self.limits)
            .field("window", &*self.lock_window())
            .finish_non_exhaustive()
    }
}

impl UsageTracker {
    /// Create a tracker on the system clock
    #[must_use]
    pub fn new(limits: UsageLimits) -> Self {
        Self::with_clock(limits, Arc::new(SystemClock))
    }

    /// Create a tracker on an injected clock
    #[must_use]
    pub fn with_clock(limits: UsageLimits, clock: Arc<dyn Clock>) -> Self {
        let window = UsageWindow::opened_at(clock.now());
        Self {
            limits,
            window: Mutex::new(window),
            clock,
        }
    }

    /// The configured limits
    #[must_use]
    pub fn limits(&self) -> &UsageLimits {
        &self.limits
    }

    /// Current time according to the tracker's clock
    #[must_use]
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    fn lock_window(&self) -> MutexGuard<'_, UsageWindow> {
        self.window.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Roll the (already locked) window forward to the clock's now.
    fn roll(&self, window: &mut UsageWindow) {
        let crossed = window.roll_forward(self.clock.now());
        if crossed.daily {
            info!("Daily usage counter reset");
        }
        if crossed.monthly {
            info!(budget = self.limits.monthly_budget(), "Monthly budget reset");
        }
    }

    /// Zero any counter whose calendar boundary has been crossed.
    pub fn reset_if_needed(&self) {
        let mut window = self.lock_window();
        self.roll(&mut window);
    }

    /// Whether an external call may be made now.
    ///
    /// Only mutation is the roll-forward; nothing is reserved.
    pub fn can_make_request(&self) -> RequestOutcome {
        let mut window = self.lock_window();
        self.roll(&mut window);
        evaluate(&window, &self.limits)
    }

    /// Record one completed external call and its true cost.
    ///
    /// Call exactly once per completed call, after the cost is known.
    /// Negative or non-finite costs are recorded as zero.
    pub fn record_request(&self, cost: f64) {
        let cost = if cost.is_finite() && cost >= 0.0 {
            cost
        } else {
            warn!(cost, "Ignoring invalid request cost");
            0.0
        };

        let mut window = self.lock_window();
        self.roll(&mut window);
        window.record(cost);

        let remaining = self.limits.monthly_budget() - window.monthly_cost();
        info!(
            cost,
            daily = window.daily_count(),
            daily_limit = self.limits.max_daily(),
            hourly = window.hourly_count(),
            hourly_limit = self.limits.max_hourly(),
            monthly_cost = window.monthly_cost(),
            monthly_budget = self.limits.monthly_budget(),
            remaining,
            "LLM request recorded"
        );
    }

    /// Read-only view of the current window.
    pub fn get_usage_stats(&self) -> UsageSnapshot {
        let mut window = self.lock_window();
        self.roll(&mut window);
        let can_make_request = evaluate(&window, &self.limits).is_allowed();
        let remaining = self.limits.monthly_budget() - window.monthly_cost();

        UsageSnapshot {
            daily_requests: window.daily_count(),
            daily_limit: self.limits.max_daily(),
            hourly_requests: window.hourly_count(),
            hourly_limit: self.limits.max_hourly(),
            monthly_cost_usd: round_to(window.monthly_cost(), 4),
            monthly_budget_usd: self.limits.monthly_budget(),
            remaining_budget_usd: round_to(remaining.max(0.0), 4),
            can_make_request,
            demo_mode: false,
        }
    }

    /// Copy of the raw window after rolling it forward
    pub fn window(&self) -> UsageWindow {
        let mut window = self.lock_window();
        self.roll(&mut window);
        window.clone()
    }
}
