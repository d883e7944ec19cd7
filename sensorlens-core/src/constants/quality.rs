//! Data-Quality Defaults
//!
//! Valid-value bounds and the expected sampling cadence used by the
//! quality scorer and by ingest validation. All of them are overridable
//! through [`QualityConfig`](crate::config::QualityConfig); these are the
//! values a freshly deployed sensor fleet starts with.

/// Lowest plausible reading.
///
/// Readings below this are counted as out of range by the quality scorer
/// and rejected at ingest.
///
/// Source: operating range of the deployed environmental probes
pub const DEFAULT_VALID_MIN: f64 = -50.0;

/// Highest plausible reading.
///
/// Source: operating range of the deployed environmental probes
pub const DEFAULT_VALID_MAX: f64 = 100.0;

/// Expected time between two samples (minutes).
///
/// The quality scorer derives the expected sample count of a window from
/// this cadence.
pub const DEFAULT_EXPECTED_INTERVAL_MINUTES: u32 = 5;

/// Scale factor turning a ratio into a percentage.
pub const PERCENT: f64 = 100.0;
