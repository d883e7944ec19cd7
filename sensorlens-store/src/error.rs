//! Error types of the store and service layer

use sensorlens_core::{AnalyticsError, Timestamp};
use thiserror::Error;

/// Storage failures
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum StoreError {
    /// A writer panicked while holding the lock
    #[error("Store lock poisoned")]
    Poisoned,
}

impl From<StoreError> for AnalyticsError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Poisoned => AnalyticsError::Store { reason: "lock poisoned" },
        }
    }
}

/// Rejected ingest batch
///
/// A rejected batch is never partially stored.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IngestError {
    #[error("Value out of range: {value} not in [{min}, {max}]")]
    OutOfRange { value: f64, min: f64, max: f64 },

    #[error("Timestamps not in order: {timestamp} repeats within the batch")]
    NotIncreasing { timestamp: Timestamp },

    #[error("Duplicate timestamp: sensor {sensor_id} already has a reading at {timestamp}")]
    Duplicate { sensor_id: u32, timestamp: Timestamp },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors surfaced by [`AnalyticsService`](crate::AnalyticsService)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServiceError {
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Ingest(#[from] IngestError),
}

impl ServiceError {
    /// Whether the caller asked for something that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Analytics(AnalyticsError::NotFound { .. }))
    }

    /// Whether the request itself was malformed
    pub fn is_bad_request(&self) -> bool {
        matches!(
            self,
            Self::Ingest(IngestError::OutOfRange { .. } | IngestError::NotIncreasing { .. } | IngestError::Duplicate { .. })
                | Self::Analytics(AnalyticsError::InvalidRange { .. } | AnalyticsError::InvalidConfig { .. })
        )
    }
}

/// Result type of the service layer
pub type ServiceResult<T> = Result<T, ServiceError>;
