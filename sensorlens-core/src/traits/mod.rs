//! Collaborator Seams of the Engine
//!
//! The engine computes; it does not own storage. Two traits describe what
//! it needs from the outside world:
//!
//! - [`ReadingStore`] - ordered range queries over raw readings
//! - [`StabilityStore`] - idempotent upsert of daily stability rows
//!
//! Both are passed explicitly into the operations that need them (drift
//! detection reads, stability indexing writes); there is no ambient session.
//!
//! ## Usage Example
//!
//! ```rust
//! use sensorlens_core::{AnalyticsError, Reading, ReadingStore, SensorId, TimeWindow};
//!
//! struct Fixture(Vec<Reading>);
//!
//! impl ReadingStore for Fixture {
//!     type Error = AnalyticsError;
//!
//!     fn readings_between(&self, sensor_id: SensorId, window: TimeWindow) -> Result<Vec<Reading>, Self::Error> {
//!         Ok(self.0.iter()
//!             .filter(|r| r.sensor_id == sensor_id && window.contains(r.timestamp))
//!             .cloned()
//!             .collect())
//!     }
//!
//!     fn last_readings(&self, sensor_id: SensorId, limit: usize) -> Result<Vec<Reading>, Self::Error> {
//!         let mine: Vec<_> = self.0.iter().filter(|r| r.sensor_id == sensor_id).cloned().collect();
//!         Ok(mine[mine.len().saturating_sub(limit)..].to_vec())
//!     }
//! }
//! ```

pub mod store;

pub use store::{ReadingStore, StabilityStore};
