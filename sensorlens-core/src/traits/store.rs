//! Store traits
//!
//! Implementations own durability, ordering and concurrency. The engine
//! relies on three guarantees:
//!
//! 1. Query results are sorted ascending by timestamp (or date)
//! 2. A sensor never has two readings with the same timestamp
//! 3. `upsert_stability` is atomic per `(sensor_id, date)` key, so
//!    concurrent indexers for the same sensor and day cannot interleave
//!
//! Store errors convert into [`AnalyticsError`] so engine operations report
//! a single error type.

use alloc::vec::Vec;

use crate::{
    analytics::StabilityRecord,
    errors::AnalyticsError,
    reading::{Reading, SensorId},
    time::{DateRange, TimeWindow},
};

/// Read access to raw sensor readings
pub trait ReadingStore {
    /// Failure reported by the store
    type Error: Into<AnalyticsError>;

    /// Readings of `sensor_id` inside `window` (inclusive), oldest first
    fn readings_between(&self, sensor_id: SensorId, window: TimeWindow) -> Result<Vec<Reading>, Self::Error>;

    /// The newest `limit` readings of `sensor_id`, oldest first
    fn last_readings(&self, sensor_id: SensorId, limit: usize) -> Result<Vec<Reading>, Self::Error>;

    /// Values of `sensor_id` inside `window`, oldest first
    fn values_between(&self, sensor_id: SensorId, window: TimeWindow) -> Result<Vec<f64>, Self::Error> {
        Ok(self
            .readings_between(sensor_id, window)?
            .into_iter()
            .map(|r| r.value)
            .collect())
    }
}

/// Durable daily stability rows
pub trait StabilityStore {
    /// Failure reported by the store
    type Error: Into<AnalyticsError>;

    /// Insert the row, or overwrite the row with the same `(sensor_id, date)`
    fn upsert_stability(&self, record: &StabilityRecord) -> Result<(), Self::Error>;

    /// Stored rows of `sensor_id` inside `range`, oldest first
    fn stability_between(&self, sensor_id: SensorId, range: DateRange) -> Result<Vec<StabilityRecord>, Self::Error>;
}
