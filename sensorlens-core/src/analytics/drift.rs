//! Drift detection between two windows
//!
//! ## Windows
//!
//! A lookback of `D` days ending at `now` is split at `now − W`:
//!
//! ```text
//! previous = [now − D, now − D + (D − W)]
//! recent   = [now − W, now]
//! ```
//!
//! Both windows are closed, so a reading exactly on the split instant
//! belongs to both.
//!
//! ## Test
//!
//! Welch's unequal-variance t-test on the finite values of each window:
//!
//! ```text
//! t  = (m_prev − m_recent) / sqrt(s²_p/n_p + s²_r/n_r)
//! df = (s²_p/n_p + s²_r/n_r)² / ((s²_p/n_p)²/(n_p − 1) + (s²_r/n_r)²/(n_r − 1))
//! p  = I_{df/(df + t²)}(df/2, 1/2)
//! ```
//!
//! Drift is reported when `p` is below the significance level (0.05).

use chrono::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    config::DriftConfig,
    constants::analytics::MIN_DRIFT_SAMPLES,
    errors::{AnalyticsError, AnalyticsResult},
    reading::SensorId,
    stats::{finite_only, mean, WelchTest},
    time::{TimeWindow, Timestamp},
    traits::ReadingStore,
};

/// Outcome of a drift check
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DriftResult {
    /// Mean of the recent window
    pub recent_mean: f64,
    /// Mean of the previous window
    pub previous_mean: f64,
    /// Welch t statistic, negative when the recent mean is higher
    pub t_statistic: f64,
    /// Two-sided p-value
    pub p_value: f64,
    /// Whether `p_value` fell below the significance level
    pub drift_detected: bool,
}

/// Previous and recent windows of one drift check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriftWindows {
    /// Older part of the lookback
    pub previous: TimeWindow,
    /// Trailing `W` days
    pub recent: TimeWindow,
}

/// Two-window Welch drift detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftDetector {
    lookback_days: u32,
    recent_days: u32,
    significance: f64,
}

impl Default for DriftDetector {
    fn default() -> Self {
        Self::from_config(&DriftConfig::default())
    }
}

impl DriftDetector {
    /// Detector over a `lookback_days` span whose last `recent_days` are "recent"
    ///
    /// A recent window longer than the lookback is clamped to it.
    pub fn new(lookback_days: u32, recent_days: u32, significance: f64) -> Self {
        Self {
            lookback_days,
            recent_days: recent_days.min(lookback_days),
            significance,
        }
    }

    /// Detector from configuration
    pub fn from_config(config: &DriftConfig) -> Self {
        Self::new(config.lookback_days, config.recent_days, config.significance)
    }

    /// Total lookback (days)
    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    /// Recent window length (days)
    pub fn recent_days(&self) -> u32 {
        self.recent_days
    }

    /// Partition the lookback ending at `now`
    pub fn windows(&self, now: Timestamp) -> DriftWindows {
        let lookback_start = now - Duration::days(i64::from(self.lookback_days));
        let previous_len = Duration::days(i64::from(self.lookback_days - self.recent_days));
        DriftWindows {
            previous: TimeWindow::new(lookback_start, lookback_start + previous_len),
            recent: TimeWindow::trailing_days(now, self.recent_days),
        }
    }

    /// Run the test on two value samples
    ///
    /// Non-finite values are dropped first.
    ///
    /// # Errors
    ///
    /// `InsufficientData` when either sample keeps fewer than two values.
    pub fn compare(&self, previous: &[f64], recent: &[f64]) -> AnalyticsResult<DriftResult> {
        let previous = finite_only(previous);
        let recent = finite_only(recent);
        let available = previous.len().min(recent.len());
        if available < MIN_DRIFT_SAMPLES {
            return Err(AnalyticsError::InsufficientData {
                required: MIN_DRIFT_SAMPLES,
                available,
            });
        }

        let insufficient = AnalyticsError::InsufficientData {
            required: MIN_DRIFT_SAMPLES,
            available,
        };
        let test = WelchTest::compare(&previous, &recent).ok_or(insufficient)?;
        let result = DriftResult {
            recent_mean: mean(&recent).ok_or(insufficient)?,
            previous_mean: mean(&previous).ok_or(insufficient)?,
            t_statistic: test.t_statistic,
            p_value: test.p_value,
            drift_detected: test.p_value < self.significance,
        };

        log_debug!(
            "drift: previous {:.3} (n={}), recent {:.3} (n={}), t={:.3}, p={:.4}",
            result.previous_mean,
            previous.len(),
            result.recent_mean,
            recent.len(),
            result.t_statistic,
            result.p_value
        );
        Ok(result)
    }

    /// Pull both windows of `sensor_id` from `store` and test them
    ///
    /// # Errors
    ///
    /// - `NotFound` when either window holds no readings
    /// - `InsufficientData` from [`compare`](Self::compare)
    /// - `Store` when the store fails
    pub fn detect<S: ReadingStore>(&self, store: &S, sensor_id: SensorId, now: Timestamp) -> AnalyticsResult<DriftResult> {
        let windows = self.windows(now);
        let previous = store
            .values_between(sensor_id, windows.previous)
            .map_err(Into::<AnalyticsError>::into)?;
        let recent = store
            .values_between(sensor_id, windows.recent)
            .map_err(Into::<AnalyticsError>::into)?;

        if previous.is_empty() {
            return Err(AnalyticsError::NotFound { what: "previous drift window" });
        }
        if recent.is_empty() {
            return Err(AnalyticsError::NotFound { what: "recent drift window" });
        }

        let result = self.compare(&previous, &recent)?;
        if result.drift_detected {
            log_warn!(
                "sensor {}: drift detected, mean {:.3} -> {:.3} (p={:.4})",
                sensor_id,
                result.previous_mean,
                result.recent_mean,
                result.p_value
            );
        }
        Ok(result)
    }
}
