//! Storage and Service Layer for SensorLens
//!
//! ## Overview
//!
//! `sensorlens-core` computes; this crate supplies what the engine expects
//! from its surroundings:
//!
//! - [`MemoryStore`]: ordered reading storage and atomic stability upserts,
//!   implementing the engine's [`ReadingStore`] and [`StabilityStore`]
//! - [`ingest`]: batch validation before anything is stored
//! - [`AnalyticsService`]: resolves "the past N days" against a clock, runs
//!   the engine components and wraps their results into [`report`] bodies
//!
//! ## Ingest Rules
//!
//! A batch is rejected whole when any value falls outside the configured
//! valid range, when two readings of the batch share a timestamp, or when
//! a timestamp is already stored for the sensor. Accepted batches are
//! stored sorted and returned with their assigned ids.
//!
//! ## Concurrency
//!
//! `MemoryStore` is `Sync`; share it (or the service) behind an `Arc`.
//! Each ingest and each upsert holds the write lock for its whole duration.
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{Duration, NaiveDate};
//! use sensorlens_core::{time::FixedClock, AnalyticsConfig};
//! use sensorlens_store::{AnalyticsService, MemoryStore, NewReading};
//!
//! let now = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let service = AnalyticsService::new(MemoryStore::new(), FixedClock::new(now), AnalyticsConfig::default())?;
//!
//! let batch = (0..12)
//!     .map(|i| NewReading::new(now - Duration::hours(12 - i), 20.0 + i as f64 * 0.1, "C"))
//!     .collect();
//! service.ingest(42, batch)?;
//!
//! let trend = service.moving_average(42, Some(3))?;
//! assert_eq!(trend.moving_average.len(), 10);
//! # Ok::<(), sensorlens_store::ServiceError>(())
//! ```

pub mod error;
pub mod ingest;
pub mod memory;
pub mod report;
pub mod service;

pub use error::{IngestError, ServiceError, ServiceResult, StoreError};
pub use ingest::{NewReading, StoredReading};
pub use memory::MemoryStore;
pub use report::{AnomalyReport, DriftReport, MovingAverageReport, PredictionReport, QualityReportResponse};
pub use service::AnalyticsService;

pub use sensorlens_core::{ReadingStore, StabilityStore};

use sensorlens_core::SensorId;

/// Write side of a reading store
///
/// Implementations store a batch that already passed
/// [`ingest::validate_batch`], rejecting it whole when a timestamp is
/// already taken for the sensor.
pub trait ReadingSink {
    /// Store `batch` (sorted, strictly increasing) for `sensor_id`
    fn append(&self, sensor_id: SensorId, batch: Vec<NewReading>) -> Result<Vec<StoredReading>, IngestError>;
}
