//! Core types and constants

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// Calendar date type used throughout the library (hotel nights, no timezone)
pub type Date = NaiveDate;

/// Property identifier
pub type PropertyId = String;

/// Monetary amount (using f64 for precision)
pub type Money = f64;

/// Percentage type (0.0 to 100.0)
pub type Percentage = f64;

/// Dimensionless multiplier applied to demand or price
pub type Factor = f64;

/// Default number of days a forecast looks ahead
pub const DEFAULT_HORIZON_DAYS: u32 = 30;

/// Number of history days fetched before a forecast target date
pub const LOOKBACK_DAYS: i64 = 90;

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Date,
    pub end: Date,
}

impl DateRange {
    /// Create a new range; `end` must not precede `start`
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// The lookback window ending the day before `target`
    pub fn lookback(target: Date, days: i64) -> Self {
        Self {
            start: target - Duration::days(days),
            end: target - Duration::days(1),
        }
    }

    /// Number of days in the range, inclusive
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Check whether a date falls inside the range
    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && date <= self.end
    }

    /// Iterate the dates in the range in ascending order
    pub fn iter_days(&self) -> impl Iterator<Item = Date> {
        let start = self.start;
        let count = self.num_days().max(0) as usize;
        (0..count).map(move |i| start + Duration::days(i as i64))
    }
}
