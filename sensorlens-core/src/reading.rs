//! Sensor readings as the engine sees them
//!
//! A reading is one timestamped sample of one sensor. Sequences handed to
//! the analytics components are sorted ascending by timestamp with no
//! duplicate timestamps per sensor. The reading store guarantees this on
//! ingest; the engine relies on it without checking.

use alloc::{string::String, vec::Vec};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// Sensor identifier
pub type SensorId = u32;

/// One timestamped sample of one sensor
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reading {
    /// Sensor that produced the sample
    pub sensor_id: SensorId,
    /// When the sample was taken (UTC)
    pub timestamp: Timestamp,
    /// Measured value
    pub value: f64,
    /// Unit of `value`, e.g. `"C"` or `"%RH"`
    pub unit: String,
}

impl Reading {
    /// Create a reading
    pub fn new(sensor_id: SensorId, timestamp: Timestamp, value: f64, unit: impl Into<String>) -> Self {
        Self {
            sensor_id,
            timestamp,
            value,
            unit: unit.into(),
        }
    }
}

/// Split readings into parallel timestamp and value columns
pub fn split_columns(readings: &[Reading]) -> (Vec<Timestamp>, Vec<f64>) {
    readings.iter().map(|r| (r.timestamp, r.value)).unzip()
}

/// Values of `readings`, in order
pub fn values_of(readings: &[Reading]) -> Vec<f64> {
    readings.iter().map(|r| r.value).collect()
}
