//! Common fixtures for service-level integration tests

#![allow(dead_code)]

use chrono::{Duration, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};

use sensorlens_core::{time::FixedClock, AnalyticsConfig, Timestamp};
use sensorlens_store::{AnalyticsService, MemoryStore, NewReading};

/// "Now" as seen by every test service
pub fn now() -> Timestamp {
    NaiveDate::from_ymd_opt(2024, 11, 15)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Service over an empty store with the clock frozen at [`now`]
pub fn service() -> AnalyticsService<MemoryStore, FixedClock> {
    service_with(AnalyticsConfig::default())
}

pub fn service_with(config: AnalyticsConfig) -> AnalyticsService<MemoryStore, FixedClock> {
    AnalyticsService::new(MemoryStore::new(), FixedClock::new(now()), config).unwrap()
}

/// `count` readings every `step`, ending at `end`, values `level ± noise`
pub fn batch_ending_at(seed: u64, end: Timestamp, step: Duration, count: usize, level: f64, noise: f64) -> Vec<NewReading> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let ts = end - step * (count - 1 - i) as i32;
            let jitter = if noise > 0.0 { rng.gen_range(-noise..=noise) } else { 0.0 };
            NewReading::new(ts, level + jitter, "C")
        })
        .collect()
}
