//! Usage Budget - gatekeeping for outbound model calls
//!
//! A single in-memory ledger per process decides whether another external
//! call is allowed right now and accumulates the cost of calls that were
//! made. Windows are calendar-aligned (hour, day, month of the local wall
//! clock) and are rolled forward lazily on every read or write; there is no
//! background timer.
//!
//! # Module Structure
//!
//! - `clock`: wall-clock abstraction (system and manual)
//! - `limits`: immutable limits (daily, hourly, monthly budget)
//! - `window`: counters plus the pure boundary-crossing logic
//! - `outcome`: `RequestOutcome` / `DenialReason`
//! - `snapshot`: read-only `UsageSnapshot`
//! - `tracker`: `UsageTracker`, the mutex-guarded ledger
//!
//! # Concurrency
//!
//! Each tracker operation (roll forward, check, record) runs under one
//! lock, so two callers can never both observe the last free slot as free
//! within a single check. The check and the later record are separate
//! operations though: the model call happens between them, outside the
//! lock. Concurrent in-flight calls can therefore overshoot the hourly or
//! daily ceiling by at most the number of calls in flight. That bound is
//! accepted.

mod clock;
mod limits;
mod outcome;
mod snapshot;
mod tracker;
mod window;


pub use clock::{Clock, ManualClock, SystemClock};
pub use limits::{
    UsageLimits, DEFAULT_MAX_REQUESTS_PER_DAY, DEFAULT_MAX_REQUESTS_PER_HOUR,
    DEFAULT_MONTHLY_BUDGET_USD,
};
pub use outcome::{DenialReason, RequestOutcome};
pub use snapshot::UsageSnapshot;
pub use tracker::UsageTracker;
pub use window::{BoundaryCrossings, UsageWindow};
