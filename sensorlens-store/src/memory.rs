//! In-memory reading and stability store
//!
//! Readings are kept per sensor in a `BTreeMap` keyed by timestamp, so
//! range queries come back sorted and a sensor can never hold two readings
//! at the same instant. Stability rows are keyed by `(sensor_id, date)`.
//!
//! One `RwLock` guards everything. Queries take the read lock; ingest and
//! upsert take the write lock, which makes each of them atomic.
//!
//! ```rust
//! use sensorlens_store::{MemoryStore, NewReading, ReadingSink};
//! use sensorlens_core::ReadingStore;
//! use chrono::NaiveDate;
//!
//! let store = MemoryStore::new();
//! let t0 = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! store.append(7, vec![NewReading::new(t0, 21.5, "C")]).unwrap();
//! assert_eq!(store.last_readings(7, 10).unwrap().len(), 1);
//! ```

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use sensorlens_core::{
    time::{DateRange, TimeWindow},
    Reading, ReadingStore, SensorId, StabilityRecord, StabilityStore, Timestamp,
};

use crate::{
    error::{IngestError, StoreError},
    ingest::{NewReading, StoredReading},
    ReadingSink,
};

#[derive(Debug, Default)]
struct Tables {
    next_id: u64,
    readings: BTreeMap<SensorId, BTreeMap<Timestamp, StoredReading>>,
    stability: BTreeMap<(SensorId, NaiveDate), f64>,
}

/// Thread-safe in-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables.write().map_err(|_| StoreError::Poisoned)
    }

    /// Number of readings held for `sensor_id`
    pub fn reading_count(&self, sensor_id: SensorId) -> Result<usize, StoreError> {
        Ok(self.read()?.readings.get(&sensor_id).map_or(0, BTreeMap::len))
    }

    /// Sensors with at least one reading
    pub fn sensors(&self) -> Result<Vec<SensorId>, StoreError> {
        Ok(self.read()?.readings.keys().copied().collect())
    }
}

impl ReadingSink for MemoryStore {
    fn append(&self, sensor_id: SensorId, batch: Vec<NewReading>) -> Result<Vec<StoredReading>, IngestError> {
        let mut tables = self.write()?;

        if let Some(existing) = tables.readings.get(&sensor_id) {
            if let Some(clash) = batch.iter().find(|r| existing.contains_key(&r.timestamp)) {
                return Err(IngestError::Duplicate {
                    sensor_id,
                    timestamp: clash.timestamp,
                });
            }
        }

        let mut stored = Vec::with_capacity(batch.len());
        for new in batch {
            tables.next_id += 1;
            stored.push(StoredReading {
                id: tables.next_id,
                reading: new.into_reading(sensor_id),
            });
        }

        let series = tables.readings.entry(sensor_id).or_default();
        for row in &stored {
            series.insert(row.reading.timestamp, row.clone());
        }
        Ok(stored)
    }
}

impl ReadingStore for MemoryStore {
    type Error = StoreError;

    fn readings_between(&self, sensor_id: SensorId, window: TimeWindow) -> Result<Vec<Reading>, Self::Error> {
        let tables = self.read()?;
        Ok(tables
            .readings
            .get(&sensor_id)
            .map(|series| {
                series
                    .range(window.start..=window.end)
                    .map(|(_, row)| row.reading.clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    fn last_readings(&self, sensor_id: SensorId, limit: usize) -> Result<Vec<Reading>, Self::Error> {
        let tables = self.read()?;
        let Some(series) = tables.readings.get(&sensor_id) else {
            return Ok(Vec::new());
        };
        let mut newest: Vec<Reading> = series
            .values()
            .rev()
            .take(limit)
            .map(|row| row.reading.clone())
            .collect();
        newest.reverse();
        Ok(newest)
    }
}

impl StabilityStore for MemoryStore {
    type Error = StoreError;

    fn upsert_stability(&self, record: &StabilityRecord) -> Result<(), Self::Error> {
        self.write()?
            .stability
            .insert((record.sensor_id, record.date), record.stsi);
        Ok(())
    }

    fn stability_between(&self, sensor_id: SensorId, range: DateRange) -> Result<Vec<StabilityRecord>, Self::Error> {
        let tables = self.read()?;
        Ok(tables
            .stability
            .range((sensor_id, range.start())..=(sensor_id, range.end()))
            .map(|(&(sensor_id, date), &stsi)| StabilityRecord { sensor_id, date, stsi })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn t(minutes: i64) -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(0, 0, 0).unwrap() + Duration::minutes(minutes)
    }

    fn batch(minutes: &[i64]) -> Vec<NewReading> {
        minutes.iter().map(|&m| NewReading::new(t(m), m as f64, "C")).collect()
    }

    #[test]
    fn ids_increase_across_sensors() {
        let store = MemoryStore::new();
        let a = store.append(1, batch(&[0, 5])).unwrap();
        let b = store.append(2, batch(&[0])).unwrap();
        assert_eq!(a[0].id, 1);
        assert_eq!(a[1].id, 2);
        assert_eq!(b[0].id, 3);
        assert_eq!(store.sensors().unwrap(), [1, 2]);
    }

    #[test]
    fn duplicate_against_stored_rejects_whole_batch() {
        let store = MemoryStore::new();
        store.append(1, batch(&[0, 5])).unwrap();
        let err = store.append(1, batch(&[10, 5])).unwrap_err();
        assert_eq!(err, IngestError::Duplicate { sensor_id: 1, timestamp: t(5) });
        assert_eq!(store.reading_count(1).unwrap(), 2);
    }

    #[test]
    fn range_is_inclusive_and_sorted() {
        let store = MemoryStore::new();
        store.append(1, batch(&[20, 0, 10, 30])).unwrap();
        let values: Vec<f64> = store
            .readings_between(1, TimeWindow::new(t(10), t(30)))
            .unwrap()
            .iter()
            .map(|r| r.value)
            .collect();
        assert_eq!(values, [10.0, 20.0, 30.0]);
        assert!(store.readings_between(9, TimeWindow::new(t(0), t(30))).unwrap().is_empty());
    }

    #[test]
    fn last_readings_oldest_first() {
        let store = MemoryStore::new();
        store.append(1, batch(&[0, 5, 10, 15])).unwrap();
        let values: Vec<f64> = store.last_readings(1, 2).unwrap().iter().map(|r| r.value).collect();
        assert_eq!(values, [10.0, 15.0]);
        assert_eq!(store.last_readings(1, 100).unwrap().len(), 4);
    }

    #[test]
    fn upsert_overwrites() {
        let store = MemoryStore::new();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        store.upsert_stability(&StabilityRecord { sensor_id: 1, date, stsi: 0.4 }).unwrap();
        store.upsert_stability(&StabilityRecord { sensor_id: 1, date, stsi: 0.9 }).unwrap();
        store
            .upsert_stability(&StabilityRecord { sensor_id: 2, date, stsi: 0.1 })
            .unwrap();

        let rows = store.stability_between(1, DateRange::day(date)).unwrap();
        assert_eq!(rows, [StabilityRecord { sensor_id: 1, date, stsi: 0.9 }]);
    }
}
