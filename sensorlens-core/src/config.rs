//! Analytics configuration
//!
//! Every threshold and reference window of the engine in one place. The
//! defaults come from [`constants`](crate::constants); deployments override
//! them in code with the `with_*` builders or from JSON:
//!
//! ```rust
//! # #[cfg(feature = "json")] {
//! use sensorlens_core::AnalyticsConfig;
//!
//! let config = AnalyticsConfig::from_json_str(
//!     r#"{ "quality": { "valid_min": -40.0, "valid_max": 85.0 } }"#,
//! ).unwrap();
//! assert_eq!(config.quality.expected_interval_minutes, 5);
//! # }
//! ```
//!
//! Sections left out of the JSON keep their defaults.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{
        analytics::{
            ANOMALY_SIGMA_MULTIPLIER, DRIFT_SIGNIFICANCE, MAX_ABS_SLOPE_PER_DAY, STABILITY_EPSILON,
            STABILITY_ROLLING_WINDOW_HOURS,
        },
        quality::{DEFAULT_EXPECTED_INTERVAL_MINUTES, DEFAULT_VALID_MAX, DEFAULT_VALID_MIN},
        windows::{
            ANOMALY_REFERENCE_DAYS, DEFAULT_FORECAST_HORIZON_DAYS, DEFAULT_SMOOTHING_WINDOW,
            DRIFT_LOOKBACK_DAYS, DRIFT_RECENT_DAYS, FORECAST_REFERENCE_DAYS, MAX_REFERENCE_DAYS,
            QUALITY_REFERENCE_DAYS, SMOOTHING_HISTORY_PADDING, STABILITY_REFERENCE_DAYS,
        },
    },
    errors::{AnalyticsError, AnalyticsResult},
};

/// Moving-average settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct SmoothingConfig {
    /// Window used when the caller does not ask for one
    pub default_window: usize,
    /// Samples fetched beyond the window
    pub history_padding: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            default_window: DEFAULT_SMOOTHING_WINDOW,
            history_padding: SMOOTHING_HISTORY_PADDING,
        }
    }
}

/// Trend forecasting settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct ForecastConfig {
    /// Steepest slope (value units per day) kept before falling back to a flat forecast
    pub max_abs_slope_per_day: f64,
    /// History the trend is fitted on (days)
    pub reference_days: u32,
    /// Horizon used when the caller does not ask for one (days)
    pub default_horizon_days: u32,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            max_abs_slope_per_day: MAX_ABS_SLOPE_PER_DAY,
            reference_days: FORECAST_REFERENCE_DAYS,
            default_horizon_days: DEFAULT_FORECAST_HORIZON_DAYS,
        }
    }
}

/// Anomaly detection settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct AnomalyConfig {
    /// Standard deviations from the mean beyond which a sample is flagged
    pub sigma_multiplier: f64,
    /// History scanned (days)
    pub reference_days: u32,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            sigma_multiplier: ANOMALY_SIGMA_MULTIPLIER,
            reference_days: ANOMALY_REFERENCE_DAYS,
        }
    }
}

/// Data-quality settings, shared with ingest validation
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct QualityConfig {
    /// Lowest valid reading
    pub valid_min: f64,
    /// Highest valid reading
    pub valid_max: f64,
    /// Expected time between samples (minutes)
    pub expected_interval_minutes: u32,
    /// History scored (days)
    pub reference_days: u32,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            valid_min: DEFAULT_VALID_MIN,
            valid_max: DEFAULT_VALID_MAX,
            expected_interval_minutes: DEFAULT_EXPECTED_INTERVAL_MINUTES,
            reference_days: QUALITY_REFERENCE_DAYS,
        }
    }
}

impl QualityConfig {
    /// Whether `value` lies inside `[valid_min, valid_max]`
    pub fn in_range(&self, value: f64) -> bool {
        self.valid_min <= value && value <= self.valid_max
    }
}

/// Stability index settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct StabilityConfig {
    /// Trailing rolling-std window (hours)
    pub rolling_window_hours: usize,
    /// Guard added to the min-max span
    pub epsilon: f64,
    /// History resampled (days)
    pub reference_days: u32,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            rolling_window_hours: STABILITY_ROLLING_WINDOW_HOURS,
            epsilon: STABILITY_EPSILON,
            reference_days: STABILITY_REFERENCE_DAYS,
        }
    }
}

/// Drift detection settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct DriftConfig {
    /// Total history split into previous and recent windows (days)
    pub lookback_days: u32,
    /// Length of the recent window (days)
    pub recent_days: u32,
    /// p-value below which drift is reported
    pub significance: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            lookback_days: DRIFT_LOOKBACK_DAYS,
            recent_days: DRIFT_RECENT_DAYS,
            significance: DRIFT_SIGNIFICANCE,
        }
    }
}

/// Complete engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct AnalyticsConfig {
    /// Moving average
    pub smoothing: SmoothingConfig,
    /// Trend forecast
    pub forecast: ForecastConfig,
    /// Anomaly detection
    pub anomaly: AnomalyConfig,
    /// Data quality and ingest bounds
    pub quality: QualityConfig,
    /// Stability index
    pub stability: StabilityConfig,
    /// Drift detection
    pub drift: DriftConfig,
}

impl AnalyticsConfig {
    /// Configuration with every default
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset for indoor climate sensors (tighter valid range, 1-minute cadence)
    pub fn indoor() -> Self {
        Self::default()
            .with_valid_range(-10.0, 50.0)
            .with_expected_interval_minutes(1)
    }

    /// Preset for slow outdoor stations (15-minute cadence, longer drift windows)
    pub fn outdoor() -> Self {
        Self::default()
            .with_expected_interval_minutes(15)
            .with_drift_windows(14, 7)
    }

    /// Override the valid reading range; bounds given in the wrong order are swapped
    pub fn with_valid_range(mut self, min: f64, max: f64) -> Self {
        let (min, max) = if min > max { (max, min) } else { (min, max) };
        self.quality.valid_min = min;
        self.quality.valid_max = max;
        self
    }

    /// Override the expected sampling interval (minutes)
    pub fn with_expected_interval_minutes(mut self, minutes: u32) -> Self {
        self.quality.expected_interval_minutes = minutes;
        self
    }

    /// Override the forecast slope guard (value units per day)
    pub fn with_max_abs_slope(mut self, per_day: f64) -> Self {
        self.forecast.max_abs_slope_per_day = libm::fabs(per_day);
        self
    }

    /// Override the anomaly threshold (standard deviations)
    pub fn with_sigma_multiplier(mut self, sigma: f64) -> Self {
        self.anomaly.sigma_multiplier = libm::fabs(sigma);
        self
    }

    /// Override the drift lookback and recent windows (days)
    pub fn with_drift_windows(mut self, lookback_days: u32, recent_days: u32) -> Self {
        self.drift.lookback_days = lookback_days;
        self.drift.recent_days = recent_days;
        self
    }

    /// Override the drift significance level
    pub fn with_significance(mut self, significance: f64) -> Self {
        self.drift.significance = significance;
        self
    }

    /// Check that every setting lies inside its domain
    pub fn validate(&self) -> AnalyticsResult<()> {
        let invalid = |reason: &'static str| -> AnalyticsResult<()> {
            Err(AnalyticsError::InvalidConfig { reason })
        };

        if !(self.quality.valid_min.is_finite() && self.quality.valid_max.is_finite()) {
            return invalid("valid range bounds must be finite");
        }
        if self.quality.valid_min > self.quality.valid_max {
            return invalid("valid_min exceeds valid_max");
        }
        if self.quality.expected_interval_minutes == 0 {
            return invalid("expected_interval_minutes must be positive");
        }
        if self.smoothing.default_window == 0 {
            return invalid("default smoothing window must be positive");
        }
        if !(self.forecast.max_abs_slope_per_day >= 0.0) {
            return invalid("max_abs_slope_per_day must be non-negative");
        }
        if !(self.anomaly.sigma_multiplier > 0.0) {
            return invalid("sigma_multiplier must be positive");
        }
        if self.stability.rolling_window_hours < 2 {
            return invalid("rolling_window_hours must cover at least two hours");
        }
        if !(self.stability.epsilon > 0.0) {
            return invalid("stability epsilon must be positive");
        }
        if self.drift.recent_days == 0 || self.drift.recent_days >= self.drift.lookback_days {
            return invalid("recent_days must be positive and shorter than lookback_days");
        }
        if !(self.drift.significance > 0.0 && self.drift.significance < 1.0) {
            return invalid("significance must lie in (0, 1)");
        }

        let windows = [
            self.forecast.reference_days,
            self.anomaly.reference_days,
            self.quality.reference_days,
            self.stability.reference_days,
            self.drift.lookback_days,
        ];
        if windows.iter().any(|&d| d == 0 || d > MAX_REFERENCE_DAYS) {
            return invalid("reference windows must span 1 to 30 days");
        }
        Ok(())
    }

    /// Parse and validate a JSON document
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> AnalyticsResult<Self> {
        let config: Self = serde_json::from_str(json).map_err(|_| AnalyticsError::InvalidConfig {
            reason: "malformed configuration JSON",
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    #[cfg(all(feature = "json", feature = "std"))]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> AnalyticsResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|_| AnalyticsError::InvalidConfig {
            reason: "configuration file unreadable",
        })?;
        Self::from_json_str(&text)
    }
}
