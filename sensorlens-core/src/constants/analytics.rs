//! Analytics Thresholds
//!
//! Numerical parameters of the six engine components. Each constant names
//! the unit it is expressed in.

// ===== FORECASTING =====

/// Steepest trend the forecaster will extrapolate (value units per day).
///
/// A fit steeper than this over a short or noisy window produces runaway
/// forecasts; it is discarded in favour of a flat forecast at the mean.
pub const MAX_ABS_SLOPE_PER_DAY: f64 = 10.0;

/// Minimum samples for a trend fit.
pub const MIN_FORECAST_SAMPLES: usize = 2;

// ===== ANOMALY DETECTION =====

/// Deviation from the window mean, in sample standard deviations, above
/// which a reading is flagged.
pub const ANOMALY_SIGMA_MULTIPLIER: f64 = 2.0;

/// Minimum samples for a sample standard deviation.
pub const MIN_ANOMALY_SAMPLES: usize = 2;

/// Tag attached to every anomaly raised by the z-score detector.
pub const ANOMALY_TYPE_TWO_SIGMA: &str = "2std";

// ===== STABILITY INDEX =====

/// Trailing window of the rolling standard deviation (hours).
pub const STABILITY_ROLLING_WINDOW_HOURS: usize = 3;

/// Guard added to the min-max span so a flat series never divides by zero.
pub const STABILITY_EPSILON: f64 = 1e-8;

/// Semantic description reported alongside stability rows.
pub const STABILITY_DESCRIPTION: &str =
    "Daily mean of inverted, min-max normalized 3-hour rolling standard deviation; higher is more stable";

// ===== DRIFT DETECTION =====

/// Two-sided p-value below which drift is reported.
pub const DRIFT_SIGNIFICANCE: f64 = 0.05;

/// Minimum finite samples per drift partition.
pub const MIN_DRIFT_SAMPLES: usize = 2;

// ===== NUMERICS =====

/// Decimal places kept on every reported value.
pub const REPORT_DECIMALS: i32 = 2;

/// Iteration cap of the incomplete-beta continued fraction.
pub const BETA_CF_MAX_ITERATIONS: usize = 300;

/// Convergence tolerance of the incomplete-beta continued fraction.
pub const BETA_CF_EPSILON: f64 = 3.0e-16;

/// Smallest magnitude allowed in continued-fraction denominators.
pub const BETA_CF_FLOOR: f64 = 1.0e-300;
