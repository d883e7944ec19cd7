//! Core analytics engine for SensorLens
//!
//! Turns ordered per-sensor readings into derived analytics: smoothed
//! trends, short-term forecasts, anomaly flags, data-quality scores, a
//! daily stability index and drift detection between time windows.
//!
//! Key constraints:
//! - Every component is a synchronous, stateless computation
//! - Inputs arrive sorted ascending by timestamp, one reading per timestamp
//! - Only the stability indexer writes state, and only through a store handle
//! - No allocation beyond `alloc` collections, float math through `libm`
//!
//! ```no_run
//! use sensorlens_core::analytics::Smoother;
//!
//! let smoother = Smoother::new(3);
//! let trend = smoother.smooth(&[10.0, 12.0, 11.0, 13.0, 12.0]);
//! assert_eq!(trend, vec![11.0, 12.0, 12.0]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

extern crate alloc;

#[macro_use]
mod macros;

pub mod analytics;
pub mod config;
pub mod constants;
pub mod errors;
pub mod reading;
pub mod stats;
pub mod time;
pub mod traits;

// Public API
pub use analytics::{
    AnomalyDetector, AnomalyRecord, DriftDetector, DriftResult, Forecaster, PredictionPoint,
    QualityReport, QualityScorer, Smoother, StabilityIndexer, StabilityRecord, StabilityReport,
};
pub use config::AnalyticsConfig;
pub use errors::{AnalyticsError, AnalyticsResult};
pub use reading::{Reading, SensorId};
pub use time::{DateRange, TimeSource, TimeWindow, Timestamp};
pub use traits::{ReadingStore, StabilityStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
