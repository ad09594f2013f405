use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single chart-ready sample.
///
/// `time` is a display label only. Labels can repeat across a day boundary,
/// so ordering must always come from the position in the series (or from
/// `instant`), never from the label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// Underlying instant of the sample
    pub instant: DateTime<Utc>,
    /// Local `HH:MM` label
    pub time: String,
    /// Observed value, historical points only
    pub actual: Option<f64>,
    /// Predicted value, forecast points only
    pub forecast: Option<f64>,
    /// Lower confidence bound
    pub confidence_lower: Option<f64>,
    /// Upper confidence bound
    pub confidence_upper: Option<f64>,
}

impl TimeSeriesPoint {
    /// Label-only point, e.g. for axis alignment.
    pub fn placeholder(instant: DateTime<Utc>, time: impl Into<String>) -> Self {
        Self {
            instant,
            time: time.into(),
            actual: None,
            forecast: None,
            confidence_lower: None,
            confidence_upper: None,
        }
    }

    pub fn historical(instant: DateTime<Utc>, time: impl Into<String>, actual: Option<f64>) -> Self {
        Self {
            actual,
            ..Self::placeholder(instant, time)
        }
    }

    pub fn forecast(instant: DateTime<Utc>, time: impl Into<String>, forecast: Option<f64>) -> Self {
        Self {
            forecast,
            ..Self::placeholder(instant, time)
        }
    }

    /// Attaches confidence bounds to the point.
    pub fn with_confidence(mut self, lower: Option<f64>, upper: Option<f64>) -> Self {
        self.confidence_lower = lower;
        self.confidence_upper = upper;
        self
    }
}

/// Output of a composition: the ordered series and the latest observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComposedForecast {
    /// History followed by the forecast horizon, ascending by instant
    pub series: Vec<TimeSeriesPoint>,
    /// Most recent observed value in `series`
    pub latest_actual: Option<f64>,
}

impl ComposedForecast {
    /// Wraps a series, deriving `latest_actual` from it.
    pub fn from_series(series: Vec<TimeSeriesPoint>) -> Self {
        let latest_actual = latest_actual(&series);
        Self {
            series,
            latest_actual,
        }
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// Scans the series from the end and returns the first observed value.
pub fn latest_actual(series: &[TimeSeriesPoint]) -> Option<f64> {
    series.iter().rev().find_map(|point| point.actual)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn test_latest_actual_skips_trailing_gaps() {
        let series = vec![
            TimeSeriesPoint::historical(at(1), "01:00", Some(60.0)),
            TimeSeriesPoint::historical(at(2), "02:00", Some(61.5)),
            TimeSeriesPoint::historical(at(3), "03:00", None),
            TimeSeriesPoint::forecast(at(4), "04:00", Some(62.0)),
        ];

        assert_eq!(latest_actual(&series), Some(61.5));
    }

    #[test]
    fn test_latest_actual_absent_without_observations() {
        let series = vec![
            TimeSeriesPoint::historical(at(1), "01:00", None),
            TimeSeriesPoint::forecast(at(2), "02:00", Some(62.0)),
        ];

        assert_eq!(latest_actual(&series), None);
        assert_eq!(latest_actual(&[]), None);
    }

    #[test]
    fn test_point_serializes_camel_case() {
        let point = TimeSeriesPoint::forecast(at(4), "04:00", Some(62.0)).with_confidence(Some(61.0), None);
        let value = serde_json::to_value(&point).unwrap();

        assert_eq!(value["time"], "04:00");
        assert_eq!(value["forecast"], 62.0);
        assert_eq!(value["confidenceLower"], 61.0);
        assert!(value["confidenceUpper"].is_null());
        assert!(value["actual"].is_null());
    }

    #[test]
    fn test_from_series_derives_latest_actual() {
        let composed = ComposedForecast::from_series(vec![
            TimeSeriesPoint::historical(at(1), "01:00", Some(60.0)),
            TimeSeriesPoint::forecast(at(2), "02:00", Some(62.0)),
            TimeSeriesPoint::forecast(at(3), "03:00", Some(63.0)),
        ]);

        assert_eq!(composed.latest_actual, Some(60.0));
        assert_eq!(composed.len(), 3);
    }
}
