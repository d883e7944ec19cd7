//! Analytics service facade
//!
//! Resolves each request's reference window against the clock, pulls the
//! readings from the store, runs the engine component and wraps the result
//! in a report. One service serves every sensor; it holds no per-request
//! state.
//!
//! | Operation            | Readings drawn                  |
//! |----------------------|---------------------------------|
//! | `moving_average`     | last `window + padding`         |
//! | `predict`            | past `forecast.reference_days`  |
//! | `anomalies`          | past `anomaly.reference_days`   |
//! | `quality_report`     | past `quality.reference_days`   |
//! | `stability_index`    | past `stability.reference_days` |
//! | `drift`              | previous and recent windows     |

use chrono::{Duration, NaiveDate};
use log::{debug, warn};

use sensorlens_core::{
    analytics::{AnomalyDetector, DriftDetector, Forecaster, QualityScorer, Smoother, StabilityIndexer},
    time::{SystemClock, TimeWindow},
    AnalyticsConfig, AnalyticsError, Reading, ReadingStore, SensorId, StabilityStore, TimeSource,
};

use crate::{
    error::{ServiceError, ServiceResult},
    ingest::{validate_batch, NewReading, StoredReading},
    report::{AnomalyReport, DriftReport, MovingAverageReport, PredictionReport, QualityReportResponse, StabilityReport},
    ReadingSink,
};

/// Request-level entry point over a store and a clock
#[derive(Debug)]
pub struct AnalyticsService<S, C = SystemClock> {
    store: S,
    clock: C,
    config: AnalyticsConfig,
}

impl<S> AnalyticsService<S, SystemClock> {
    /// Service on the wall clock with default configuration
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            clock: SystemClock,
            config: AnalyticsConfig::default(),
        }
    }
}

impl<S, C> AnalyticsService<S, C>
where
    S: ReadingStore + StabilityStore,
    C: TimeSource,
{
    /// Service over `store`, telling time by `clock`
    ///
    /// # Errors
    ///
    /// `InvalidConfig` when `config` fails validation.
    pub fn new(store: S, clock: C, config: AnalyticsConfig) -> ServiceResult<Self> {
        config.validate()?;
        Ok(Self { store, clock, config })
    }

    /// Backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Active configuration
    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Readings from `days` days before now onward, including any stamped
    /// after the clock
    fn past_days(&self, sensor_id: SensorId, days: u32) -> ServiceResult<Vec<Reading>> {
        let cutoff = self.clock.now() - Duration::days(i64::from(days));
        let window = TimeWindow::since(cutoff);
        let readings = self
            .store
            .readings_between(sensor_id, window)
            .map_err(Into::<AnalyticsError>::into)?;
        debug!("sensor {}: {} readings over the past {} days", sensor_id, readings.len(), days);
        Ok(readings)
    }

    /// Validate and store a batch of new readings
    ///
    /// Returns the stored readings, oldest first.
    pub fn ingest(&self, sensor_id: SensorId, batch: Vec<NewReading>) -> ServiceResult<Vec<StoredReading>>
    where
        S: ReadingSink,
    {
        let submitted = batch.len();
        let stored = validate_batch(&self.config.quality, batch)
            .and_then(|sorted| self.store.append(sensor_id, sorted))
            .map_err(|err| {
                warn!("sensor {}: rejected batch of {}: {}", sensor_id, submitted, err);
                ServiceError::from(err)
            })?;
        debug!("sensor {}: stored {} readings", sensor_id, stored.len());
        Ok(stored)
    }

    /// Moving average over the latest readings
    ///
    /// `window` defaults to the configured smoothing window.
    pub fn moving_average(&self, sensor_id: SensorId, window: Option<usize>) -> ServiceResult<MovingAverageReport> {
        let window = window.unwrap_or(self.config.smoothing.default_window);
        let limit = window.saturating_add(self.config.smoothing.history_padding);
        let readings = self
            .store
            .last_readings(sensor_id, limit)
            .map_err(Into::<AnalyticsError>::into)?;
        let values: Vec<f64> = readings.iter().map(|r| r.value).collect();

        Ok(MovingAverageReport {
            sensor_id,
            window,
            moving_average: Smoother::new(window).smooth(&values),
        })
    }

    /// Daily forecast over the next `days` days
    ///
    /// `days` defaults to the configured horizon.
    pub fn predict(&self, sensor_id: SensorId, days: Option<u32>) -> ServiceResult<PredictionReport> {
        let days = days.unwrap_or(self.config.forecast.default_horizon_days);
        let readings = self.past_days(sensor_id, self.config.forecast.reference_days)?;

        Ok(PredictionReport {
            sensor_id,
            predict_days: days,
            predicted_values: Forecaster::from_config(&self.config.forecast).forecast_readings(&readings, days),
        })
    }

    /// Samples beyond the sigma threshold of the anomaly window
    pub fn anomalies(&self, sensor_id: SensorId) -> ServiceResult<AnomalyReport> {
        let readings = self.past_days(sensor_id, self.config.anomaly.reference_days)?;

        Ok(AnomalyReport {
            sensor_id,
            anomalies: AnomalyDetector::from_config(&self.config.anomaly).detect_readings(&readings),
        })
    }

    /// Missing-sample and out-of-range shares of the quality window
    pub fn quality_report(&self, sensor_id: SensorId) -> ServiceResult<QualityReportResponse> {
        let readings = self.past_days(sensor_id, self.config.quality.reference_days)?;
        let scorer = QualityScorer::from_config(&self.config.quality);
        let report = scorer.score_readings(&readings);

        Ok(QualityReportResponse {
            sensor_id,
            expected_interval_minutes: scorer.expected_interval_minutes(),
            missing_percentage: report.missing_percentage,
            out_of_range_percentage: report.out_of_range_percentage,
        })
    }

    /// Recompute and persist the stability index, report `[start, end]`
    ///
    /// # Errors
    ///
    /// - `InvalidRange` when `start > end`
    /// - `NotFound` when the stability window holds no readings
    pub fn stability_index(&self, sensor_id: SensorId, start: NaiveDate, end: NaiveDate) -> ServiceResult<StabilityReport> {
        let readings = self.past_days(sensor_id, self.config.stability.reference_days)?;
        let report = StabilityIndexer::from_config(&self.config.stability).index(&self.store, sensor_id, &readings, start, end)?;
        Ok(report)
    }

    /// Welch drift test between the previous and recent windows
    ///
    /// Window lengths default to the configured ones.
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` when `recent_days` is not shorter than `lookback_days`
    /// - `NotFound` when either window holds no readings
    /// - `InsufficientData` when either window has fewer than two finite values
    pub fn drift(&self, sensor_id: SensorId, lookback_days: Option<u32>, recent_days: Option<u32>) -> ServiceResult<DriftReport> {
        let lookback_days = lookback_days.unwrap_or(self.config.drift.lookback_days);
        let recent_days = recent_days.unwrap_or(self.config.drift.recent_days);
        if recent_days == 0 || recent_days >= lookback_days {
            return Err(AnalyticsError::InvalidConfig {
                reason: "recent drift window must be non-empty and shorter than the lookback",
            }
            .into());
        }

        let detector = DriftDetector::new(lookback_days, recent_days, self.config.drift.significance);
        let result = detector.detect(&self.store, sensor_id, self.clock.now())?;

        Ok(DriftReport {
            sensor_id,
            lookback_days,
            recent_days,
            result,
        })
    }
}
