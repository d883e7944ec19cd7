//! Sensor Stability Index (STSI)
//!
//! ## Pipeline
//!
//! 1. **Resample**: readings are bucketed into a regular 1-hour grid from
//!    the hour of the first reading to the hour of the last. Each bucket
//!    holds the mean of its finite readings.
//! 2. **Fill**: empty buckets are linearly interpolated on grid position
//!    between the nearest filled buckets. Gaps before the first (after the
//!    last) filled bucket take its value.
//! 3. **Variability**: trailing rolling sample standard deviation over the
//!    last `w` hours (3 by default). The first `w − 1` hours are 0.
//! 4. **Normalize and invert**: `stability = 1 − (s − min)/(max − min + ε)`
//!    with ε = 1e-8, so a flat series scores exactly 1 every hour.
//! 5. **Aggregate**: hourly stability is averaged per calendar day.
//! 6. **Persist**: every daily row is upserted by `(sensor_id, date)`.
//!
//! Rows are written only after every day has been computed, and stored at
//! full precision. The returned report keeps the days inside the requested
//! range, rounded to two decimals.

use alloc::{collections::BTreeMap, format, string::String, vec::Vec};

use chrono::{Duration, NaiveDate};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    config::StabilityConfig,
    constants::analytics::{REPORT_DECIMALS, STABILITY_DESCRIPTION},
    errors::{AnalyticsError, AnalyticsResult},
    reading::{Reading, SensorId},
    stats::{mean, round_to, sample_std_dev},
    time::{floor_to_hour, DateRange, Timestamp},
    traits::StabilityStore,
};

/// One bucket of the hourly grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourlyPoint {
    /// Start of the hour
    pub hour: Timestamp,
    /// Bucket mean, or the interpolated value for an empty bucket
    pub value: f64,
}

/// Stability of one sensor on one day
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StabilityRecord {
    /// Sensor the row belongs to
    pub sensor_id: SensorId,
    /// Calendar day
    pub date: NaiveDate,
    /// Mean hourly stability of the day, approximately in `[0, 1]`
    pub stsi: f64,
}

/// Stability rows of a reporting range with their metadata
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct StabilityReport {
    /// Sensor reported on
    pub sensor_id: SensorId,
    /// Rolling window label, e.g. `"3h"`
    pub window: String,
    /// What the index measures
    pub description: &'static str,
    /// Daily rows inside the requested range, oldest first
    pub records: Vec<StabilityRecord>,
}

/// Bucket `readings` into a gap-free hourly grid
///
/// `readings` must be sorted ascending. Non-finite values are ignored.
///
/// # Errors
///
/// - `NotFound` when `readings` is empty
/// - `Degenerate` when no reading has a finite value
pub fn resample_hourly(readings: &[Reading]) -> AnalyticsResult<Vec<HourlyPoint>> {
    let (Some(first), Some(last)) = (readings.first(), readings.last()) else {
        return Err(AnalyticsError::NotFound { what: "stability readings" });
    };
    let origin = floor_to_hour(first.timestamp);
    let hours = (floor_to_hour(last.timestamp) - origin).num_hours().max(0) as usize + 1;

    let mut buckets: Vec<(f64, usize)> = alloc::vec![(0.0, 0); hours];
    for reading in readings.iter().filter(|r| r.value.is_finite()) {
        let slot = (floor_to_hour(reading.timestamp) - origin).num_hours();
        if let Some(bucket) = usize::try_from(slot).ok().and_then(|i| buckets.get_mut(i)) {
            bucket.0 += reading.value;
            bucket.1 += 1;
        }
    }

    let known: Vec<(usize, f64)> = buckets
        .iter()
        .enumerate()
        .filter(|(_, (_, count))| *count > 0)
        .map(|(i, (sum, count))| (i, sum / *count as f64))
        .collect();
    if known.is_empty() {
        return Err(AnalyticsError::Degenerate {
            reason: "no finite readings to resample",
        });
    }

    let filled = fill_gaps(hours, &known);
    log_debug!(
        "resampled {} readings into {} hours ({} interpolated)",
        readings.len(),
        hours,
        hours - known.len()
    );

    Ok(filled
        .into_iter()
        .enumerate()
        .map(|(i, value)| HourlyPoint {
            hour: origin + Duration::hours(i as i64),
            value,
        })
        .collect())
}

// `known` is non-empty and sorted by position.
fn fill_gaps(len: usize, known: &[(usize, f64)]) -> Vec<f64> {
    let mut filled = Vec::with_capacity(len);
    let mut next = 0;
    for i in 0..len {
        while next < known.len() && known[next].0 < i {
            next += 1;
        }
        let value = match (next.checked_sub(1).map(|p| known[p]), known.get(next)) {
            (_, Some(&(at, v))) if at == i => v,
            (Some((i0, v0)), Some(&(i1, v1))) => {
                v0 + (v1 - v0) * (i - i0) as f64 / (i1 - i0) as f64
            }
            (Some((_, v0)), None) => v0,
            (None, Some(&(_, v1))) => v1,
            (None, None) => 0.0,
        };
        filled.push(value);
    }
    filled
}

/// Trailing rolling sample standard deviation
///
/// Position `i` covers `values[i + 1 - window ..= i]`. Positions without a
/// full window, and every position when `window < 2`, are 0.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| {
            if window < 2 || i + 1 < window {
                return 0.0;
            }
            sample_std_dev(&values[i + 1 - window..=i]).unwrap_or(0.0)
        })
        .collect()
}

/// Min-max normalize and invert: `1 − (s − min)/(max − min + epsilon)`
///
/// With a positive `epsilon` the result is finite for any finite input and
/// all-equal input maps to 1.
pub fn normalize_inverted(stds: &[f64], epsilon: f64) -> Vec<f64> {
    let (lo, hi) = stds
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| (lo.min(s), hi.max(s)));
    let span = hi - lo + epsilon;
    stds.iter().map(|&s| 1.0 - (s - lo) / span).collect()
}

/// Daily stability indexer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityIndexer {
    rolling_window_hours: usize,
    epsilon: f64,
}

impl Default for StabilityIndexer {
    fn default() -> Self {
        Self::from_config(&StabilityConfig::default())
    }
}

impl StabilityIndexer {
    /// Indexer with a `rolling_window_hours` trailing window
    pub fn new(rolling_window_hours: usize, epsilon: f64) -> Self {
        Self {
            rolling_window_hours,
            epsilon,
        }
    }

    /// Indexer from configuration
    pub fn from_config(config: &StabilityConfig) -> Self {
        Self::new(config.rolling_window_hours, config.epsilon)
    }

    /// Hourly stability series
    pub fn hourly_stability(&self, readings: &[Reading]) -> AnalyticsResult<Vec<HourlyPoint>> {
        let grid = resample_hourly(readings)?;
        let values: Vec<f64> = grid.iter().map(|p| p.value).collect();
        let stability = normalize_inverted(&rolling_std(&values, self.rolling_window_hours), self.epsilon);

        Ok(grid
            .into_iter()
            .zip(stability)
            .map(|(point, value)| HourlyPoint { hour: point.hour, value })
            .collect())
    }

    /// Unrounded daily stability rows, oldest first
    pub fn daily_stability(&self, sensor_id: SensorId, readings: &[Reading]) -> AnalyticsResult<Vec<StabilityRecord>> {
        let mut days: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
        for point in self.hourly_stability(readings)? {
            days.entry(point.hour.date()).or_default().push(point.value);
        }

        Ok(days
            .into_iter()
            .filter_map(|(date, hourly)| {
                mean(&hourly).map(|stsi| StabilityRecord { sensor_id, date, stsi })
            })
            .collect())
    }

    /// Compute, persist and report the stability index
    ///
    /// Upserts one row per day covered by `readings`, then returns the rows
    /// dated inside `[start, end]`.
    ///
    /// # Errors
    ///
    /// - `InvalidRange` when `start > end`
    /// - `NotFound` when `readings` is empty
    /// - `Store` when an upsert fails; rows already written stay written
    pub fn index<S: StabilityStore>(
        &self,
        store: &S,
        sensor_id: SensorId,
        readings: &[Reading],
        start: NaiveDate,
        end: NaiveDate,
    ) -> AnalyticsResult<StabilityReport> {
        let range = DateRange::new(start, end)?;
        if readings.is_empty() {
            return Err(AnalyticsError::NotFound {
                what: "stability reference window",
            });
        }

        let rows = self.daily_stability(sensor_id, readings)?;
        for row in &rows {
            store
                .upsert_stability(row)
                .map_err(Into::<AnalyticsError>::into)?;
        }
        log_debug!("sensor {}: upserted {} stability rows", sensor_id, rows.len());

        Ok(StabilityReport {
            sensor_id,
            window: format!("{}h", self.rolling_window_hours),
            description: STABILITY_DESCRIPTION,
            records: rows
                .into_iter()
                .filter(|row| range.contains(row.date))
                .map(|row| StabilityRecord {
                    stsi: round_to(row.stsi, REPORT_DECIMALS),
                    ..row
                })
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        rows: RefCell<BTreeMap<(SensorId, NaiveDate), f64>>,
    }

    impl StabilityStore for Recorder {
        type Error = AnalyticsError;

        fn upsert_stability(&self, record: &StabilityRecord) -> Result<(), Self::Error> {
            self.rows
                .borrow_mut()
                .insert((record.sensor_id, record.date), record.stsi);
            Ok(())
        }

        fn stability_between(&self, sensor_id: SensorId, range: DateRange) -> Result<Vec<StabilityRecord>, Self::Error> {
            Ok(self
                .rows
                .borrow()
                .iter()
                .filter(|((id, date), _)| *id == sensor_id && range.contains(*date))
                .map(|(&(sensor_id, date), &stsi)| StabilityRecord { sensor_id, date, stsi })
                .collect())
        }
    }

    fn at(day: u32, h: u32, m: u32) -> Timestamp {
        NaiveDate::from_ymd_opt(2024, 7, day).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, day).unwrap()
    }

    #[test]
    fn buckets_average_and_interpolate() {
        let readings = [
            Reading::new(1, at(1, 0, 10), 10.0, "C"),
            Reading::new(1, at(1, 0, 40), 12.0, "C"),
            Reading::new(1, at(1, 3, 0), 20.0, "C"),
        ];
        let grid = resample_hourly(&readings).unwrap();
        let values: Vec<f64> = grid.iter().map(|p| p.value).collect();
        assert_eq!(values, [11.0, 14.0, 17.0, 20.0]);
        assert_eq!(grid[0].hour, at(1, 0, 0));
        assert_eq!(grid[3].hour, at(1, 3, 0));
    }

    #[test]
    fn non_finite_edges_are_filled_flat() {
        let readings = [
            Reading::new(1, at(1, 0, 0), f64::NAN, "C"),
            Reading::new(1, at(1, 1, 0), 5.0, "C"),
            Reading::new(1, at(1, 2, 0), 7.0, "C"),
            Reading::new(1, at(1, 3, 0), f64::INFINITY, "C"),
        ];
        let values: Vec<f64> = resample_hourly(&readings).unwrap().iter().map(|p| p.value).collect();
        assert_eq!(values, [5.0, 5.0, 7.0, 7.0]);
    }

    #[test]
    fn all_nan_is_degenerate() {
        let readings = [Reading::new(1, at(1, 0, 0), f64::NAN, "C")];
        assert!(matches!(resample_hourly(&readings), Err(AnalyticsError::Degenerate { .. })));
    }

    #[test]
    fn rolling_window_pads_with_zero() {
        let stds = rolling_std(&[1.0, 2.0, 3.0, 3.0, 3.0], 3);
        assert_eq!(stds[0], 0.0);
        assert_eq!(stds[1], 0.0);
        assert!(libm::fabs(stds[2] - 1.0) < 1e-12);
        assert_eq!(stds[4], 0.0);
        assert!(rolling_std(&[1.0, 2.0], 3).iter().all(|&s| s == 0.0));
    }

    #[test]
    fn normalization_inverts() {
        let scores = normalize_inverted(&[0.0, 1.0, 0.5], 1e-8);
        assert!(libm::fabs(scores[0] - 1.0) < 1e-9);
        assert!(libm::fabs(scores[1]) < 1e-7);
        assert!(libm::fabs(scores[2] - 0.5) < 1e-7);
    }

    #[test]
    fn flat_series_is_perfectly_stable() {
        let readings: Vec<_> = (0..48)
            .map(|h| Reading::new(3, at(1, 0, 0) + Duration::hours(h), 21.0, "C"))
            .collect();
        let hourly = StabilityIndexer::default().hourly_stability(&readings).unwrap();
        assert!(hourly.iter().all(|p| p.value == 1.0));
    }

    #[test]
    fn index_upserts_every_day_and_reports_range() {
        let readings: Vec<_> = (0..72)
            .map(|h| {
                let noise = if h >= 48 { (h % 2) as f64 * 4.0 } else { 0.0 };
                Reading::new(9, at(1, 0, 0) + Duration::hours(h), 20.0 + noise, "C")
            })
            .collect();
        let store = Recorder::default();

        let report = StabilityIndexer::default()
            .index(&store, 9, &readings, date(2), date(3))
            .unwrap();

        assert_eq!(store.rows.borrow().len(), 3);
        assert_eq!(report.window, "3h");
        assert_eq!(report.records.len(), 2);
        assert_eq!(report.records[0].date, date(2));
        assert!(report.records[0].stsi > report.records[1].stsi);
        assert!(report.records.iter().all(|r| r.stsi == round_to(r.stsi, 2)));
    }

    #[test]
    fn reindexing_overwrites_rows() {
        let store = Recorder::default();
        let indexer = StabilityIndexer::default();
        let calm: Vec<_> = (0..24)
            .map(|h| Reading::new(2, at(5, 0, 0) + Duration::hours(h), 20.0, "C"))
            .collect();
        indexer.index(&store, 2, &calm, date(5), date(5)).unwrap();
        indexer.index(&store, 2, &calm, date(5), date(5)).unwrap();
        assert_eq!(store.stability_between(2, DateRange::day(date(5))).unwrap().len(), 1);
    }

    #[test]
    fn range_is_checked_before_readings() {
        let store = Recorder::default();
        let err = StabilityIndexer::default()
            .index(&store, 1, &[], date(3), date(1))
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidRange { .. }));

        let err = StabilityIndexer::default()
            .index(&store, 1, &[], date(1), date(3))
            .unwrap_err();
        assert!(matches!(err, AnalyticsError::NotFound { .. }));
        assert!(store.rows.borrow().is_empty());
    }
}
