//! Data-quality scoring
//!
//! Two shares, both in percent and rounded to two decimals:
//!
//! ```text
//! expected = floor(span_seconds / (interval_minutes · 60))
//! missing  = expected − count + 1
//! missing% = 100 · missing / expected        (0 when expected == 0)
//! range%   = 100 · count(value ∉ [min, max]) / count
//! ```
//!
//! `missing%` is not clamped. A series sampled more densely than the
//! expected interval scores negative.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    config::QualityConfig,
    constants::{analytics::REPORT_DECIMALS, quality::PERCENT, time::SECONDS_PER_MINUTE},
    reading::Reading,
    stats::round_to,
    time::{elapsed_seconds, Timestamp},
};

/// Missing-sample and out-of-range shares of a window
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct QualityReport {
    /// Percentage of expected samples that never arrived (negative when oversampled)
    pub missing_percentage: f64,
    /// Percentage of samples outside the valid range
    pub out_of_range_percentage: f64,
}

/// Quality scorer over a fixed valid range and sampling interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityScorer {
    config: QualityConfig,
}

impl Default for QualityScorer {
    fn default() -> Self {
        Self::from_config(&QualityConfig::default())
    }
}

impl QualityScorer {
    /// Scorer with explicit valid range and expected interval
    pub fn new(valid_min: f64, valid_max: f64, expected_interval_minutes: u32) -> Self {
        let (valid_min, valid_max) = if valid_min > valid_max {
            (valid_max, valid_min)
        } else {
            (valid_min, valid_max)
        };
        Self {
            config: QualityConfig {
                valid_min,
                valid_max,
                expected_interval_minutes,
                ..QualityConfig::default()
            },
        }
    }

    /// Scorer from configuration
    pub fn from_config(config: &QualityConfig) -> Self {
        Self { config: *config }
    }

    /// Expected sampling interval (minutes)
    pub fn expected_interval_minutes(&self) -> u32 {
        self.config.expected_interval_minutes
    }

    /// Score parallel timestamp and value columns
    ///
    /// An empty timestamp column scores `(0, 0)`.
    pub fn score(&self, timestamps: &[Timestamp], values: &[f64]) -> QualityReport {
        QualityReport {
            missing_percentage: self.missing_percentage(timestamps),
            out_of_range_percentage: self.out_of_range_percentage(values),
        }
    }

    /// [`score`](Self::score) over readings
    pub fn score_readings(&self, readings: &[Reading]) -> QualityReport {
        let (timestamps, values) = crate::reading::split_columns(readings);
        self.score(&timestamps, &values)
    }

    fn missing_percentage(&self, timestamps: &[Timestamp]) -> f64 {
        let (Some(first), Some(last)) = (timestamps.iter().min(), timestamps.iter().max()) else {
            return 0.0;
        };
        let interval_seconds = f64::from(self.config.expected_interval_minutes) * SECONDS_PER_MINUTE as f64;
        if !(interval_seconds > 0.0) {
            return 0.0;
        }

        let expected = libm::floor(elapsed_seconds(*first, *last) / interval_seconds) as i64;
        if expected == 0 {
            return 0.0;
        }
        let missing = expected - timestamps.len() as i64 + 1;
        log_debug!(
            "quality: {} samples, {} expected, {} missing",
            timestamps.len(),
            expected,
            missing
        );
        round_to(PERCENT * missing as f64 / expected as f64, REPORT_DECIMALS)
    }

    fn out_of_range_percentage(&self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        let outside = values
            .iter()
            .filter(|&&v| !v.is_nan() && !self.config.in_range(v))
            .count();
        round_to(PERCENT * outside as f64 / values.len() as f64, REPORT_DECIMALS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use chrono::{Duration, NaiveDate};

    fn every(minutes: i64, n: usize) -> Vec<Timestamp> {
        let start = NaiveDate::from_ymd_opt(2024, 4, 10).unwrap().and_hms_opt(8, 0, 0).unwrap();
        (0..n).map(|i| start + Duration::minutes(minutes * i as i64)).collect()
    }

    #[test]
    fn empty_window_scores_zero() {
        let report = QualityScorer::default().score(&[], &[]);
        assert_eq!(report, QualityReport::default());
    }

    #[test]
    fn regular_hour_has_nothing_missing() {
        // 13 samples at 0, 5, .. 60 minutes
        let timestamps = every(5, 13);
        let mut values = alloc::vec![20.0; 13];
        values[4] = 120.0;

        let report = QualityScorer::default().score(&timestamps, &values);
        assert_eq!(report.missing_percentage, 0.0);
        assert_eq!(report.out_of_range_percentage, round_to(100.0 / 13.0, 2));
    }

    #[test]
    fn gaps_count_as_missing() {
        // every 10 minutes over 2 hours: 13 samples where 25 expected
        let timestamps = every(10, 13);
        let report = QualityScorer::default().score(&timestamps, &[21.0; 13]);
        assert_eq!(report.missing_percentage, 50.0);
        assert_eq!(report.out_of_range_percentage, 0.0);
    }

    #[test]
    fn oversampling_is_negative() {
        // every minute over 10 minutes, 5 minute interval: 11 samples, 2 expected
        let timestamps = every(1, 11);
        let report = QualityScorer::default().score(&timestamps, &[21.0; 11]);
        assert_eq!(report.missing_percentage, -400.0);
    }

    #[test]
    fn span_shorter_than_interval() {
        let timestamps = every(1, 3);
        let report = QualityScorer::default().score(&timestamps, &[1.0, 2.0, 3.0]);
        assert_eq!(report.missing_percentage, 0.0);
    }

    #[test]
    fn bounds_are_inclusive_and_configurable() {
        let timestamps = every(5, 4);
        let values = [-50.0, 100.0, -50.5, 100.5];
        assert_eq!(QualityScorer::default().score(&timestamps, &values).out_of_range_percentage, 50.0);

        let indoor = QualityScorer::new(50.0, -10.0, 5);
        assert_eq!(indoor.score(&timestamps, &values).out_of_range_percentage, 100.0);
    }
}
