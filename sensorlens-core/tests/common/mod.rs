//! Common test utilities and data generators for integration tests
//!
//! This module provides:
//! - Deterministic series generators (seeded `StdRng`) with diurnal swing,
//!   noise, trend and injected spikes
//! - An in-memory store fixture implementing both store traits
//! - Approximate-equality assertions

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate, Timelike};
use rand::{rngs::StdRng, Rng, SeedableRng};

use sensorlens_core::{
    time::DateRange, AnalyticsError, Reading, ReadingStore, SensorId, StabilityRecord,
    StabilityStore, TimeWindow, Timestamp,
};

/// Fixed reference instant used across the integration tests
pub fn epoch() -> Timestamp {
    NaiveDate::from_ymd_opt(2024, 10, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Generator of realistic single-sensor series
pub struct SeriesGenerator {
    rng: StdRng,
    sensor_id: SensorId,
    start: Timestamp,
    step: Duration,
}

impl SeriesGenerator {
    pub fn new(seed: u64, sensor_id: SensorId) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            sensor_id,
            start: epoch(),
            step: Duration::minutes(5),
        }
    }

    pub fn starting_at(mut self, start: Timestamp) -> Self {
        self.start = start;
        self
    }

    pub fn every(mut self, step: Duration) -> Self {
        self.step = step;
        self
    }

    /// Temperature-like series: base + diurnal swing + uniform noise
    pub fn temperature(&mut self, base: f64, count: usize, noise: f64) -> Vec<Reading> {
        (0..count)
            .map(|i| {
                let ts = self.start + self.step * i as i32;
                let hour = f64::from(ts.hour()) + f64::from(ts.minute()) / 60.0;
                let diurnal = 2.0 * (2.0 * std::f64::consts::PI * hour / 24.0).sin();
                let jitter = self.rng.gen_range(-noise..=noise);
                Reading::new(self.sensor_id, ts, base + diurnal + jitter, "C")
            })
            .collect()
    }

    /// Perfectly linear series: `intercept + slope_per_day · days`
    pub fn linear(&mut self, intercept: f64, slope_per_day: f64, count: usize) -> Vec<Reading> {
        (0..count)
            .map(|i| {
                let ts = self.start + self.step * i as i32;
                let days = (ts - self.start).num_seconds() as f64 / 86_400.0;
                Reading::new(self.sensor_id, ts, intercept + slope_per_day * days, "C")
            })
            .collect()
    }

    /// Flat series with uniform noise
    pub fn noisy_constant(&mut self, level: f64, count: usize, noise: f64) -> Vec<Reading> {
        (0..count)
            .map(|i| {
                let jitter = if noise > 0.0 { self.rng.gen_range(-noise..=noise) } else { 0.0 };
                Reading::new(self.sensor_id, self.start + self.step * i as i32, level + jitter, "C")
            })
            .collect()
    }
}

/// Replace the value at `index` with `value`
pub fn inject_spike(readings: &mut [Reading], index: usize, value: f64) {
    if let Some(r) = readings.get_mut(index) {
        r.value = value;
    }
}

/// Store fixture over a fixed reading set
#[derive(Default)]
pub struct FixtureStore {
    pub readings: Vec<Reading>,
    pub stability: RefCell<BTreeMap<(SensorId, NaiveDate), f64>>,
    pub upserts: RefCell<usize>,
}

impl FixtureStore {
    pub fn with_readings(readings: Vec<Reading>) -> Self {
        Self {
            readings,
            ..Self::default()
        }
    }
}

impl ReadingStore for FixtureStore {
    type Error = AnalyticsError;

    fn readings_between(&self, sensor_id: SensorId, window: TimeWindow) -> Result<Vec<Reading>, Self::Error> {
        let mut found: Vec<Reading> = self
            .readings
            .iter()
            .filter(|r| r.sensor_id == sensor_id && window.contains(r.timestamp))
            .cloned()
            .collect();
        found.sort_by_key(|r| r.timestamp);
        Ok(found)
    }

    fn last_readings(&self, sensor_id: SensorId, limit: usize) -> Result<Vec<Reading>, Self::Error> {
        let mut mine: Vec<Reading> = self.readings.iter().filter(|r| r.sensor_id == sensor_id).cloned().collect();
        mine.sort_by_key(|r| r.timestamp);
        let skip = mine.len().saturating_sub(limit);
        Ok(mine.split_off(skip))
    }
}

impl StabilityStore for FixtureStore {
    type Error = AnalyticsError;

    fn upsert_stability(&self, record: &StabilityRecord) -> Result<(), Self::Error> {
        *self.upserts.borrow_mut() += 1;
        self.stability
            .borrow_mut()
            .insert((record.sensor_id, record.date), record.stsi);
        Ok(())
    }

    fn stability_between(&self, sensor_id: SensorId, range: DateRange) -> Result<Vec<StabilityRecord>, Self::Error> {
        Ok(self
            .stability
            .borrow()
            .iter()
            .filter(|((id, date), _)| *id == sensor_id && range.contains(*date))
            .map(|(&(sensor_id, date), &stsi)| StabilityRecord { sensor_id, date, stsi })
            .collect())
    }
}

/// Assert `actual` is within `tolerance` of `expected`
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected} ± {tolerance}, got {actual}"
    );
}
