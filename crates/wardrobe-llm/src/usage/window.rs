//! Usage window and boundary-crossing logic
//!
//! Boundaries are calendar components, not elapsed durations: a window
//! left idle for several days rolls forward to a single fresh window on the
//! next check, with no backlog of missed resets.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

/// Which windows `now` has moved past
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryCrossings {
    /// Calendar date advanced
    pub daily: bool,
    /// Calendar hour advanced
    pub hourly: bool,
    /// Calendar month advanced
    pub monthly: bool,
}

impl BoundaryCrossings {
    /// Whether any window needs resetting
    #[must_use]
    pub fn any(&self) -> bool {
        self.daily || self.hourly || self.monthly
    }
}

/// Counters for the current hour, day and month
#[derive(Debug, Clone, PartialEq)]
pub struct UsageWindow {
    daily_count: u32,
    hourly_count: u32,
    monthly_cost: f64,
    last_reset_day: NaiveDate,
    last_reset_hour: NaiveDateTime,
    monthly_reset: NaiveDate,
}

/// Start of the calendar hour containing `time`
fn hour_start(time: NaiveDateTime) -> NaiveDateTime {
    time.date().and_hms_opt(time.hour(), 0, 0).unwrap_or(time)
}

/// First day of the calendar month containing `date`
fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

impl UsageWindow {
    /// A fresh window whose boundaries are those containing `now`
    #[must_use]
    pub fn opened_at(now: NaiveDateTime) -> Self {
        Self {
            daily_count: 0,
            hourly_count: 0,
            monthly_cost: 0.0,
            last_reset_day: now.date(),
            last_reset_hour: hour_start(now),
            monthly_reset: month_start(now.date()),
        }
    }

    /// Which boundaries lie between the last observed ones and `now`.
    ///
    /// Pure: depends only on `now` and the stored boundaries. A clock that
    /// went backwards crosses nothing.
    #[must_use]
    pub fn crossings(&self, now: NaiveDateTime) -> BoundaryCrossings {
        BoundaryCrossings {
            daily: now.date() > self.last_reset_day,
            hourly: hour_start(now) > self.last_reset_hour,
            monthly: month_start(now.date()) > self.monthly_reset,
        }
    }

    /// Zero every counter whose boundary was crossed and advance that
    /// boundary to the one containing `now`.
    pub fn roll_forward(&mut self, now: NaiveDateTime) -> BoundaryCrossings {
        let crossed = self.crossings(now);
        if crossed.daily {
            self.daily_count = 0;
            self.last_reset_day = now.date();
        }
        if crossed.hourly {
            self.hourly_count = 0;
            self.last_reset_hour = hour_start(now);
        }
        if crossed.monthly {
            self.monthly_cost = 0.0;
            self.monthly_reset = month_start(now.date());
        }
        crossed
    }

    /// Count one completed call and add its cost
    pub fn record(&mut self, cost: f64) {
        self.daily_count = self.daily_count.saturating_add(1);
        self.hourly_count = self.hourly_count.saturating_add(1);
        self.monthly_cost += cost;
    }

    /// Calls recorded today
    #[must_use]
    pub fn daily_count(&self) -> u32 {
        self.daily_count
    }

    /// Calls recorded this hour
    #[must_use]
    pub fn hourly_count(&self) -> u32 {
        self.hourly_count
    }

    /// Spend recorded this month (USD)
    #[must_use]
    pub fn monthly_cost(&self) -> f64 {
        self.monthly_cost
    }

    /// Date of the last daily reset
    #[must_use]
    pub fn last_reset_day(&self) -> NaiveDate {
        self.last_reset_day
    }

    /// Start of the hour of the last hourly reset
    #[must_use]
    pub fn last_reset_hour(&self) -> NaiveDateTime {
        self.last_reset_hour
    }

    /// First day of the month of the last monthly reset
    #[must_use]
    pub fn monthly_reset(&self) -> NaiveDate {
        self.monthly_reset
    }
}
