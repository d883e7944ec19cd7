//! Ingest validation
//!
//! A batch for one sensor is accepted whole or not at all:
//!
//! 1. Every value must lie inside the configured valid range. NaN never does.
//! 2. Sorted by timestamp, the batch must be strictly increasing, so no
//!    two readings of the batch share a timestamp.
//!
//! Collisions with readings already stored are checked by the store under
//! its write lock.

use serde::{Deserialize, Serialize};

use sensorlens_core::{config::QualityConfig, Reading, SensorId, Timestamp};

use crate::error::IngestError;

/// Reading as submitted by a client, before it is assigned to a sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReading {
    /// Measurement time (UTC)
    pub timestamp: Timestamp,
    /// Measured value
    pub value: f64,
    /// Unit label, e.g. `"C"`
    pub unit: String,
}

impl NewReading {
    /// Reading taken at `timestamp`
    pub fn new(timestamp: Timestamp, value: f64, unit: impl Into<String>) -> Self {
        Self {
            timestamp,
            value,
            unit: unit.into(),
        }
    }

    /// Attach to `sensor_id`
    pub fn into_reading(self, sensor_id: SensorId) -> Reading {
        Reading::new(sensor_id, self.timestamp, self.value, self.unit)
    }
}

/// Reading as kept by the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredReading {
    /// Store-assigned id, increasing in insertion order
    pub id: u64,
    /// The reading itself, flattened on the wire
    #[serde(flatten)]
    pub reading: Reading,
}

/// Validate `batch` and return it sorted by timestamp
pub fn validate_batch(bounds: &QualityConfig, mut batch: Vec<NewReading>) -> Result<Vec<NewReading>, IngestError> {
    if let Some(bad) = batch.iter().find(|r| !bounds.in_range(r.value)) {
        return Err(IngestError::OutOfRange {
            value: bad.value,
            min: bounds.valid_min,
            max: bounds.valid_max,
        });
    }

    batch.sort_by_key(|r| r.timestamp);
    if let Some(pair) = batch.windows(2).find(|pair| pair[1].timestamp <= pair[0].timestamp) {
        return Err(IngestError::NotIncreasing {
            timestamp: pair[1].timestamp,
        });
    }

    Ok(batch)
}
