use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Rows of the `forecast` matrix returned by the forecast service.
///
/// The service emits quantile rows ordered lower, point, upper. Only
/// [`ForecastBand::Point`] is required; the bounds are optional extras.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForecastBand {
    /// Lower confidence bound
    Lower,
    /// Point forecast
    Point,
    /// Upper confidence bound
    Upper,
}

impl ForecastBand {
    /// Position of this band inside the `forecast` array.
    pub const fn index(self) -> usize {
        match self {
            ForecastBand::Lower => 0,
            ForecastBand::Point => 1,
            ForecastBand::Upper => 2,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            ForecastBand::Lower => "lower",
            ForecastBand::Point => "point",
            ForecastBand::Upper => "upper",
        }
    }
}

/// Forecast service response as it appears on the wire.
///
/// Every field is optional so that a malformed document still decodes and
/// the composer can report exactly which field is missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RawForecastPayload {
    /// ISO-8601 instants of the observed samples, strictly increasing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Vec<String>>,
    /// Observed value per timestamp, `null` when the sensor reported nothing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<Vec<Option<f64>>>,
    /// Quantile rows `[lower, point, upper]`, each one value per forecast step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<Object>>)]
    pub forecast: Option<Vec<Value>>,
}

impl RawForecastPayload {
    /// Builds a well-formed payload from typed parts.
    pub fn new(timestamps: Vec<String>, actual: Vec<Option<f64>>, forecast: Vec<Vec<f64>>) -> Self {
        let forecast = forecast
            .into_iter()
            .map(|row| Value::Array(row.into_iter().map(Value::from).collect()))
            .collect();

        Self {
            timestamps: Some(timestamps),
            actual: Some(actual),
            forecast: Some(forecast),
        }
    }

    /// Raw JSON row for a band, if the service sent one.
    ///
    /// This is the only place that knows how bands map onto array indices.
    pub fn band(&self, band: ForecastBand) -> Option<&Value> {
        self.forecast.as_ref()?.get(band.index())
    }

    /// Raw JSON row holding the point forecast.
    pub fn point_forecast(&self) -> Option<&Value> {
        self.band(ForecastBand::Point)
    }

    /// Numeric view of a band; `None` when the row is missing or is not an
    /// array. Entries that are not numbers map to `None`.
    pub fn band_values(&self, band: ForecastBand) -> Option<Vec<Option<f64>>> {
        let row = self.band(band)?.as_array()?;
        Some(row.iter().map(Value::as_f64).collect())
    }
}
