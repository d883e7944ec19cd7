//! Time handling for the analytics engine
//!
//! Provides:
//! - Clock abstraction, so "the past N days" is resolved against a source
//!   callers control (system clock in production, fixed clock in tests)
//! - Closed time windows and calendar-date ranges
//! - Elapsed-time helpers used by the forecaster, quality scorer and the
//!   hourly resampler

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::time::{MS_PER_DAY_F64, MS_PER_SECOND},
    errors::{AnalyticsError, AnalyticsResult},
};

/// Reading timestamp (UTC, naive)
pub type Timestamp = NaiveDateTime;

/// Source of "now" for trailing-window queries
pub trait TimeSource {
    /// Current timestamp
    fn now(&self) -> Timestamp;
}

/// System clock in UTC (requires std)
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl TimeSource for SystemClock {
    fn now(&self) -> Timestamp {
        chrono::Utc::now().naive_utc()
    }
}

/// Fixed time source for testing and replay
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    timestamp: Timestamp,
}

impl FixedClock {
    /// Clock frozen at `timestamp`
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }

    /// Move the clock to `timestamp`
    pub fn set(&mut self, timestamp: Timestamp) {
        self.timestamp = timestamp;
    }

    /// Move the clock forward
    pub fn advance(&mut self, by: Duration) {
        self.timestamp += by;
    }
}

impl TimeSource for FixedClock {
    fn now(&self) -> Timestamp {
        self.timestamp
    }
}

impl<T: TimeSource + ?Sized> TimeSource for &T {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Closed time interval `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeWindow {
    /// First instant included
    pub start: Timestamp,
    /// Last instant included
    pub end: Timestamp,
}

impl TimeWindow {
    /// Window over `[start, end]`
    ///
    /// Endpoints given in the wrong order are swapped.
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        if start > end {
            Self { start: end, end: start }
        } else {
            Self { start, end }
        }
    }

    /// The `days` days leading up to and including `now`
    pub fn trailing_days(now: Timestamp, days: u32) -> Self {
        Self {
            start: now - Duration::days(i64::from(days)),
            end: now,
        }
    }

    /// Everything from `start` onward, with no upper bound
    pub fn since(start: Timestamp) -> Self {
        Self {
            start,
            end: NaiveDateTime::MAX,
        }
    }

    /// Whether `ts` lies inside the window (both ends inclusive)
    pub fn contains(&self, ts: Timestamp) -> bool {
        self.start <= ts && ts <= self.end
    }

    /// Window length
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Closed range of calendar dates `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Range over `[start, end]`, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> AnalyticsResult<Self> {
        if start > end {
            return Err(AnalyticsError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A single day
    pub fn day(date: NaiveDate) -> Self {
        Self { start: date, end: date }
    }

    /// First day included
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day included
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether `date` lies inside the range
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Seconds from `from` to `to`, with millisecond resolution
pub fn elapsed_seconds(from: Timestamp, to: Timestamp) -> f64 {
    (to - from).num_milliseconds() as f64 / MS_PER_SECOND as f64
}

/// Fractional days from `from` to `to`
pub fn elapsed_days(from: Timestamp, to: Timestamp) -> f64 {
    (to - from).num_milliseconds() as f64 / MS_PER_DAY_F64
}

/// Start of the hour containing `ts`
pub fn floor_to_hour(ts: Timestamp) -> Timestamp {
    ts.with_nanosecond(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_minute(0))
        .unwrap_or(ts)
}
