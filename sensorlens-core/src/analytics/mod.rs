//! Analytics Components
//!
//! ## Overview
//!
//! Six independent components, each a synchronous computation over an
//! ordered `(timestamp, value)` sequence:
//!
//! | Component            | Input window | Output                         |
//! |----------------------|--------------|--------------------------------|
//! | [`Smoother`]         | last W+10    | rolling means                  |
//! | [`Forecaster`]       | 7 days       | one point per forecast day     |
//! | [`AnomalyDetector`]  | 30 days      | samples beyond 2σ              |
//! | [`QualityScorer`]    | 7 days       | missing / out-of-range shares  |
//! | [`StabilityIndexer`] | 7 days       | daily stability rows (upserts) |
//! | [`DriftDetector`]    | 6 days       | Welch t-test between windows   |
//!
//! ## Degradation Policy
//!
//! Sparse-but-present data gives a well-defined empty or zero result
//! (smoothing, forecasting, anomaly detection, quality scoring). Empty
//! windows for the stability index and drift detection, and malformed date
//! ranges, are errors the caller sees.
//!
//! ## Numerical Guards
//!
//! Zero variance never reaches a division: the anomaly detector returns no
//! anomalies, the stability normalization adds an epsilon to its span, and
//! the drift test resolves a zero standard error to a fixed statistic.
//!
//! ## Concurrency
//!
//! Components hold only their configuration, are `Copy`, and share no
//! state between calls. The one write, the stability upsert, is made
//! atomic by the store.

mod anomaly;
mod drift;
mod forecast;
mod quality;
mod smoothing;
mod stability;

pub use anomaly::{AnomalyDetector, AnomalyKind, AnomalyRecord};
pub use drift::{DriftDetector, DriftResult, DriftWindows};
pub use forecast::{Forecaster, PredictionPoint, TrendFit};
pub use quality::{QualityReport, QualityScorer};
pub use smoothing::Smoother;
pub use stability::{
    normalize_inverted, resample_hourly, rolling_std, HourlyPoint, StabilityIndexer,
    StabilityRecord, StabilityReport,
};
