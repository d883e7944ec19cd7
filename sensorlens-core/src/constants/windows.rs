//! Reference Windows
//!
//! How much history each analysis looks at. The service resolves these
//! against its clock ("the past N days") before handing readings to the
//! engine; the engine itself never looks at wall-clock time.

/// Default moving-average window (samples).
pub const DEFAULT_SMOOTHING_WINDOW: usize = 10;

/// Extra samples fetched beyond the smoothing window.
///
/// A window of W over `W + 10` samples yields 11 smoothed points.
pub const SMOOTHING_HISTORY_PADDING: usize = 10;

/// Trailing history used to fit the forecast trend (days).
pub const FORECAST_REFERENCE_DAYS: u32 = 7;

/// Default forecast horizon (days).
pub const DEFAULT_FORECAST_HORIZON_DAYS: u32 = 3;

/// Trailing history scanned for anomalies (days).
///
/// Long enough that a single spike cannot dominate the mean and spread.
pub const ANOMALY_REFERENCE_DAYS: u32 = 30;

/// Trailing history scored for data quality (days).
pub const QUALITY_REFERENCE_DAYS: u32 = 7;

/// Trailing history fed into the stability index (days).
pub const STABILITY_REFERENCE_DAYS: u32 = 7;

/// Total lookback split into previous and recent drift windows (days).
pub const DRIFT_LOOKBACK_DAYS: u32 = 6;

/// Length of the recent drift window (days).
pub const DRIFT_RECENT_DAYS: u32 = 3;

/// Upper bound on any reference window (days).
///
/// Keeps a single request's latency predictable; configuration asking for
/// more is rejected.
pub const MAX_REFERENCE_DAYS: u32 = 30;
