//! Constants for SensorLens Core
//!
//! Centralized, documented constants used throughout the engine. Every
//! tunable here has a matching field in [`AnalyticsConfig`](crate::config::AnalyticsConfig);
//! the constants are its defaults.
//!
//! ## Organization
//!
//! - **Time**: unit conversions
//! - **Quality**: valid-value bounds and sampling cadence
//! - **Windows**: how much history each analysis reads
//! - **Analytics**: thresholds of the individual components
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Name the unit in the constant name or its doc comment
//! 3. Group related constants together

/// Time unit conversions.
pub mod time;

/// Valid-value bounds and expected sampling cadence.
pub mod quality;

/// Reference windows of each analysis.
pub mod windows;

/// Thresholds of the analytics components.
pub mod analytics;

// Re-export commonly used constants for convenience
pub use time::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

pub use quality::{DEFAULT_EXPECTED_INTERVAL_MINUTES, DEFAULT_VALID_MAX, DEFAULT_VALID_MIN};

pub use windows::{
    ANOMALY_REFERENCE_DAYS, DRIFT_LOOKBACK_DAYS, DRIFT_RECENT_DAYS, FORECAST_REFERENCE_DAYS,
    QUALITY_REFERENCE_DAYS, STABILITY_REFERENCE_DAYS,
};

pub use analytics::{
    ANOMALY_SIGMA_MULTIPLIER, DRIFT_SIGNIFICANCE, MAX_ABS_SLOPE_PER_DAY, REPORT_DECIMALS,
    STABILITY_EPSILON, STABILITY_ROLLING_WINDOW_HOURS,
};
