//! Time-Related Constants
//!
//! Conversion factors used when timestamps are turned into elapsed
//! seconds, days and hourly grid positions.

// ===== TIME UNIT CONVERSIONS =====

/// Milliseconds per second.
pub const MS_PER_SECOND: i64 = 1000;

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: i64 = 60;

/// Minutes per hour.
pub const MINUTES_PER_HOUR: i64 = 60;

/// Hours per day.
pub const HOURS_PER_DAY: i64 = 24;

/// Seconds per hour.
pub const SECONDS_PER_HOUR: i64 = SECONDS_PER_MINUTE * MINUTES_PER_HOUR;

/// Seconds per day.
pub const SECONDS_PER_DAY: i64 = SECONDS_PER_HOUR * HOURS_PER_DAY;

/// Milliseconds per day, as a float divisor for fractional day offsets.
pub const MS_PER_DAY_F64: f64 = (SECONDS_PER_DAY * MS_PER_SECOND) as f64;
