//! Linear-trend forecasting
//!
//! ## Method
//!
//! Timestamps become fractional days elapsed since the first sample and an
//! ordinary-least-squares line is fitted through `(day, value)`. The line is
//! then evaluated one, two, .. `horizon` days past the last sample.
//!
//! ## Degeneracy Guard
//!
//! Short or noisy windows can fit an absurd slope that extrapolates to
//! nonsense within days. A fit steeper than the configured limit
//! (10 value units per day by default) is discarded and replaced by a flat
//! line at the mean of the observed values:
//!
//! ```text
//! |slope| <= limit : value(d) = slope · d + intercept
//! |slope| >  limit : value(d) = mean(values)
//! ```

use alloc::vec::Vec;

use chrono::{Duration, NaiveDate};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    config::ForecastConfig,
    constants::analytics::{MIN_FORECAST_SAMPLES, REPORT_DECIMALS},
    reading::Reading,
    stats::{mean, round_to, LinearFit},
    time::{elapsed_days, Timestamp},
};

/// One forecast day
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PredictionPoint {
    /// Calendar day of the prediction
    pub date: NaiveDate,
    /// Predicted value, rounded to two decimals
    pub value: f64,
}

/// Trend fitted by the forecaster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendFit {
    /// Line in `(elapsed days, value)` space actually used for prediction
    pub line: LinearFit,
    /// Whether the least-squares slope was discarded by the guard
    pub flattened: bool,
    /// Day offset of the last observed sample
    pub last_day: f64,
}

/// OLS trend forecaster with a slope guard
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forecaster {
    max_abs_slope_per_day: f64,
}

impl Default for Forecaster {
    fn default() -> Self {
        Self::from_config(&ForecastConfig::default())
    }
}

impl Forecaster {
    /// Forecaster discarding fits steeper than `max_abs_slope_per_day`
    pub fn new(max_abs_slope_per_day: f64) -> Self {
        Self {
            max_abs_slope_per_day: libm::fabs(max_abs_slope_per_day),
        }
    }

    /// Forecaster from configuration
    pub fn from_config(config: &ForecastConfig) -> Self {
        Self::new(config.max_abs_slope_per_day)
    }

    /// Fit the trend, `None` below two samples
    ///
    /// `timestamps` and `values` are parallel columns; extra entries in the
    /// longer one are ignored.
    pub fn fit(&self, timestamps: &[Timestamp], values: &[f64]) -> Option<TrendFit> {
        let n = timestamps.len().min(values.len());
        if n < MIN_FORECAST_SAMPLES {
            return None;
        }
        let (timestamps, values) = (&timestamps[..n], &values[..n]);

        let origin = timestamps[0];
        let days: Vec<f64> = timestamps.iter().map(|&ts| elapsed_days(origin, ts)).collect();
        let last_day = days[n - 1];

        let fitted = LinearFit::ols(&days, values)?;
        if libm::fabs(fitted.slope) > self.max_abs_slope_per_day {
            log_warn!(
                "trend slope {:.3}/day exceeds limit {:.3}/day, forecasting flat",
                fitted.slope,
                self.max_abs_slope_per_day
            );
            return Some(TrendFit {
                line: LinearFit::flat(mean(values)?),
                flattened: true,
                last_day,
            });
        }

        Some(TrendFit {
            line: fitted,
            flattened: false,
            last_day,
        })
    }

    /// Forecast `horizon_days` daily points past the last sample
    ///
    /// Empty below two samples.
    pub fn forecast(&self, timestamps: &[Timestamp], values: &[f64], horizon_days: u32) -> Vec<PredictionPoint> {
        let Some(trend) = self.fit(timestamps, values) else {
            log_debug!("forecast skipped: {} samples", timestamps.len().min(values.len()));
            return Vec::new();
        };
        let n = timestamps.len().min(values.len());
        let last_seen = timestamps[n - 1];

        (1..=horizon_days)
            .map(|i| {
                let offset = f64::from(i);
                PredictionPoint {
                    date: (last_seen + Duration::days(i64::from(i))).date(),
                    value: round_to(trend.line.predict(trend.last_day + offset), REPORT_DECIMALS),
                }
            })
            .collect()
    }

    /// [`forecast`](Self::forecast) over readings
    pub fn forecast_readings(&self, readings: &[Reading], horizon_days: u32) -> Vec<PredictionPoint> {
        let (timestamps, values) = crate::reading::split_columns(readings);
        self.forecast(&timestamps, &values, horizon_days)
    }
}
