//! Error Types for Analytics Failures
//!
//! ## Design Philosophy
//!
//! Most analytics degrade gracefully: sparse-but-present data yields an
//! empty or zero result instead of an error. Smoothing a series shorter
//! than its window, scoring an empty window or looking for anomalies in two
//! identical samples all return well-defined values. Errors are reserved for
//! the cases a caller must react to.
//!
//! Like the rest of the engine, errors stay small and `Copy`: payloads are
//! numbers, dates and `&'static str`, never heap strings.
//!
//! ## Error Categories
//!
//! ### Data Availability
//! - `InsufficientData`: fewer samples than a component needs (drift test)
//! - `NotFound`: the reference window holds no readings at all
//!
//! ### Caller Mistakes
//! - `InvalidRange`: reporting range with `start > end`
//! - `InvalidConfig`: a tunable outside its meaningful domain
//!
//! ### Numerical
//! - `Degenerate`: zero-variance input that cannot resolve to a defined value
//!
//! ### Collaborators
//! - `Store`: the reading or stability store failed
//!
//! ## Handling Strategy
//!
//! ```rust
//! use sensorlens_core::AnalyticsError;
//!
//! fn status_for(err: &AnalyticsError) -> u16 {
//!     match err {
//!         AnalyticsError::NotFound { .. } => 404,
//!         AnalyticsError::InvalidRange { .. } | AnalyticsError::InvalidConfig { .. } => 400,
//!         AnalyticsError::InsufficientData { .. } | AnalyticsError::Degenerate { .. } => 422,
//!         AnalyticsError::Store { .. } => 503,
//!     }
//! }
//! ```

use chrono::NaiveDate;
use thiserror_no_std::Error;

/// Result type for analytics operations
pub type AnalyticsResult<T> = Result<T, AnalyticsError>;

/// Analytics errors
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum AnalyticsError {
    /// Not enough samples for the requested computation
    #[error("Insufficient data: need {required}, have {available}")]
    InsufficientData {
        /// Minimum number of samples the computation needs
        required: usize,
        /// Number of samples actually available
        available: usize,
    },

    /// The window the computation reads from is empty
    #[error("No readings found: {what}")]
    NotFound {
        /// Which window came back empty
        what: &'static str,
    },

    /// Zero-variance input that has no defined result
    #[error("Degenerate input: {reason}")]
    Degenerate {
        /// What made the input degenerate
        reason: &'static str,
    },

    /// Reporting range whose start lies after its end
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange {
        /// First day of the requested range
        start: NaiveDate,
        /// Last day of the requested range
        end: NaiveDate,
    },

    /// Configuration value outside its domain
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Which setting was rejected
        reason: &'static str,
    },

    /// Reading or stability store failed
    #[error("Store failure: {reason}")]
    Store {
        /// Short description of the failure
        reason: &'static str,
    },
}

impl AnalyticsError {
    /// Whether the error means "nothing to compute on" rather than a fault
    pub fn is_missing_data(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::InsufficientData { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_carry_context() {
        let err = AnalyticsError::InsufficientData { required: 2, available: 1 };
        assert_eq!(err.to_string(), "Insufficient data: need 2, have 1");

        let start = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let end = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let err = AnalyticsError::InvalidRange { start, end };
        assert_eq!(err.to_string(), "Invalid date range: 2024-03-05 is after 2024-03-01");
    }

    #[test]
    fn missing_data_classification() {
        assert!(AnalyticsError::NotFound { what: "stability window" }.is_missing_data());
        assert!(!AnalyticsError::Store { reason: "poisoned" }.is_missing_data());
    }
}
