//! Serializable response bodies
//!
//! Engine results wrapped with the request parameters that produced them.
//! Field names are the wire names.

use serde::Serialize;

use sensorlens_core::{AnomalyRecord, DriftResult, PredictionPoint, SensorId};

pub use sensorlens_core::StabilityReport;

/// Smoothed trend of the latest readings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovingAverageReport {
    /// Sensor reported on
    pub sensor_id: SensorId,
    /// Window width used
    pub window: usize,
    /// Rolling means, oldest first
    pub moving_average: Vec<f64>,
}

/// Daily trend forecast
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionReport {
    /// Sensor reported on
    pub sensor_id: SensorId,
    /// Forecast horizon (days)
    pub predict_days: u32,
    /// One point per future day
    pub predicted_values: Vec<PredictionPoint>,
}

/// Flagged readings of the reference window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyReport {
    /// Sensor reported on
    pub sensor_id: SensorId,
    /// Flagged readings in timestamp order
    pub anomalies: Vec<AnomalyRecord>,
}

/// Data-quality scores of the reference window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReportResponse {
    /// Sensor reported on
    pub sensor_id: SensorId,
    /// Sampling interval the missing share is measured against
    pub expected_interval_minutes: u32,
    /// Share of expected samples that never arrived (%)
    pub missing_percentage: f64,
    /// Share of readings outside the valid range (%)
    pub out_of_range_percentage: f64,
}

/// Drift check between the previous and recent windows
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriftReport {
    /// Sensor reported on
    pub sensor_id: SensorId,
    /// Total lookback (days)
    pub lookback_days: u32,
    /// Recent window length (days)
    pub recent_days: u32,
    /// Test outcome
    pub result: DriftResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sensorlens_core::analytics::AnomalyKind;

    #[test]
    fn anomaly_type_tag_on_the_wire() {
        let report = AnomalyReport {
            sensor_id: 3,
            anomalies: vec![AnomalyRecord {
                timestamp: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap().and_hms_opt(6, 30, 0).unwrap(),
                value: 88.5,
                kind: AnomalyKind::TwoSigma,
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["anomalies"][0]["type"], "2std");
        assert_eq!(json["anomalies"][0]["timestamp"], "2024-05-01T06:30:00");
    }

    #[test]
    fn infinite_t_statistic_serializes_as_null() {
        let report = DriftReport {
            sensor_id: 1,
            lookback_days: 6,
            recent_days: 3,
            result: DriftResult {
                recent_mean: 6.0,
                previous_mean: 5.0,
                t_statistic: f64::INFINITY,
                p_value: 0.0,
                drift_detected: true,
            },
        };
        let json = serde_json::to_value(&report).unwrap();
        assert!(json["result"]["t_statistic"].is_null());
        assert_eq!(json["result"]["drift_detected"], true);
    }

    #[test]
    fn stability_report_shape() {
        let report = StabilityReport {
            sensor_id: 2,
            window: "3h".to_string(),
            description: "stability",
            records: vec![sensorlens_core::StabilityRecord {
                sensor_id: 2,
                date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                stsi: 0.75,
            }],
        };
        let json = serde_json::to_value(&report).unwrap();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 4);
        for key in ["sensor_id", "window", "description", "records"] {
            assert!(keys.contains(&key), "missing {key}");
        }
        assert_eq!(json["records"][0]["date"], "2024-05-01");
    }

    #[test]
    fn prediction_dates_are_plain_dates() {
        let report = PredictionReport {
            sensor_id: 1,
            predict_days: 1,
            predicted_values: vec![PredictionPoint {
                date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
                value: 21.25,
            }],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(
            json,
            r#"{"sensor_id":1,"predict_days":1,"predicted_values":[{"date":"2024-05-02","value":21.25}]}"#
        );
    }
}
