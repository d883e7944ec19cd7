//! Whole-window z-score anomaly detection
//!
//! One batch pass over a fixed window: the mean and sample standard
//! deviation are computed once over every sample, then each sample whose
//! absolute deviation from the mean exceeds `k · σ` (k = 2 by default) is
//! flagged. Detection is not causal; a sample is judged against statistics
//! that include later samples.
//!
//! A window with zero spread has no anomalies. The detector returns before
//! comparing anything, so a constant series cannot flag every point.

use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    config::AnomalyConfig,
    constants::analytics::{ANOMALY_TYPE_TWO_SIGMA, MIN_ANOMALY_SAMPLES},
    reading::Reading,
    stats::{mean, sample_std_dev},
    time::Timestamp,
};

/// Kind of anomaly raised
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnomalyKind {
    /// Beyond the sigma threshold of the window
    #[cfg_attr(feature = "serde", serde(rename = "2std"))]
    TwoSigma,
}

impl AnomalyKind {
    /// Wire tag of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TwoSigma => ANOMALY_TYPE_TWO_SIGMA,
        }
    }
}

/// One flagged sample
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnomalyRecord {
    /// When the sample was taken
    pub timestamp: Timestamp,
    /// The flagged value
    pub value: f64,
    /// Why it was flagged
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: AnomalyKind,
}

/// Batch z-score detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyDetector {
    sigma_multiplier: f64,
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::from_config(&AnomalyConfig::default())
    }
}

impl AnomalyDetector {
    /// Detector flagging samples beyond `sigma_multiplier` standard deviations
    pub fn new(sigma_multiplier: f64) -> Self {
        Self { sigma_multiplier }
    }

    /// Detector from configuration
    pub fn from_config(config: &AnomalyConfig) -> Self {
        Self::new(config.sigma_multiplier)
    }

    /// Flag outliers among parallel `timestamps` / `values` columns
    ///
    /// Empty below two samples and for zero-variance windows.
    pub fn detect(&self, timestamps: &[Timestamp], values: &[f64]) -> Vec<AnomalyRecord> {
        let n = timestamps.len().min(values.len());
        if n < MIN_ANOMALY_SAMPLES {
            return Vec::new();
        }
        let values = &values[..n];

        let (Some(center), Some(spread)) = (mean(values), sample_std_dev(values)) else {
            return Vec::new();
        };
        if !(spread > 0.0) {
            log_debug!("anomaly scan over {} samples: zero variance", n);
            return Vec::new();
        }

        let threshold = self.sigma_multiplier * spread;
        let anomalies: Vec<AnomalyRecord> = timestamps
            .iter()
            .zip(values)
            .filter(|(_, &v)| libm::fabs(v - center) > threshold)
            .map(|(&timestamp, &value)| AnomalyRecord {
                timestamp,
                value,
                kind: AnomalyKind::TwoSigma,
            })
            .collect();

        log_debug!(
            "anomaly scan over {} samples: mean {:.3}, sd {:.3}, {} flagged",
            n,
            center,
            spread,
            anomalies.len()
        );
        anomalies
    }

    /// [`detect`](Self::detect) over readings
    pub fn detect_readings(&self, readings: &[Reading]) -> Vec<AnomalyRecord> {
        let (timestamps, values) = crate::reading::split_columns(readings);
        self.detect(&timestamps, &values)
    }
}
