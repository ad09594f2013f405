//! Point and interval forecasts for the temperature history.

use tracing::{debug, instrument};

use crate::error::{ForecastError, ForecastResult};

/// Quantile rows of a forecast, one value per future step.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileForecast {
    pub lower: Vec<f64>,
    pub point: Vec<f64>,
    pub upper: Vec<f64>,
}

impl QuantileForecast {
    pub fn len(&self) -> usize {
        self.point.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }

    /// Rows in wire order: lower, point, upper.
    pub fn into_rows(self) -> Vec<Vec<f64>> {
        vec![self.lower, self.point, self.upper]
    }
}

/// Common trait for all forecasting models.
pub trait Forecaster: Send + Sync {
    /// Predicts `prediction_length` steps following `context`.
    fn predict(&self, context: &[f64], prediction_length: usize) -> ForecastResult<QuantileForecast>;

    /// Short model name for logs and health output.
    fn name(&self) -> &'static str;
}

/// Holt's linear trend method (double exponential smoothing) with a
/// residual-based prediction interval that widens with the horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct HoltForecaster {
    /// Level smoothing parameter
    alpha: f64,
    /// Trend smoothing parameter
    beta: f64,
    /// Standard-normal quantile of the interval half-width
    z: f64,
}

/// z for the 10th/90th percentiles.
const DEFAULT_Z: f64 = 1.281_551_565_5;

impl Default for HoltForecaster {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            beta: 0.1,
            z: DEFAULT_Z,
        }
    }
}

impl HoltForecaster {
    /// Create a new Holt model
    ///
    /// # Arguments
    ///
    /// * `alpha` - Level smoothing (0 < alpha < 1)
    /// * `beta` - Trend smoothing (0 < beta < 1)
    pub fn new(alpha: f64, beta: f64) -> ForecastResult<Self> {
        if !(0.0 < alpha && alpha < 1.0) {
            return Err(ForecastError::InvalidParameter {
                name: "alpha",
                reason: "must be between 0 and 1 (exclusive)".to_string(),
            });
        }
        if !(0.0 < beta && beta < 1.0) {
            return Err(ForecastError::InvalidParameter {
                name: "beta",
                reason: "must be between 0 and 1 (exclusive)".to_string(),
            });
        }

        Ok(Self {
            alpha,
            beta,
            z: DEFAULT_Z,
        })
    }

    /// Sets the interval width as a standard-normal quantile.
    pub fn with_z(mut self, z: f64) -> ForecastResult<Self> {
        if !(z.is_finite() && z >= 0.0) {
            return Err(ForecastError::InvalidParameter {
                name: "z",
                reason: "must be a non-negative finite number".to_string(),
            });
        }
        self.z = z;
        Ok(self)
    }

    /// Fits level and trend, returning them with the RMS of the one-step
    /// ahead errors.
    fn fit(&self, data: &[f64]) -> (f64, f64, f64) {
        let mut level = data[0];
        let mut trend = data[1] - data[0];
        let mut squared_error = 0.0;

        for &value in &data[1..] {
            let error = value - (level + trend);
            squared_error += error * error;

            let prev_level = level;
            level = self.alpha * value + (1.0 - self.alpha) * (level + trend);
            trend = self.beta * (level - prev_level) + (1.0 - self.beta) * trend;
        }

        let sigma = (squared_error / (data.len() - 1) as f64).sqrt();
        (level, trend, sigma)
    }
}

impl Forecaster for HoltForecaster {
    #[instrument(skip(self, context), fields(context_len = context.len()))]
    fn predict(&self, context: &[f64], prediction_length: usize) -> ForecastResult<QuantileForecast> {
        if context.len() < 3 {
            return Err(ForecastError::InsufficientData {
                required: 3,
                actual: context.len(),
            });
        }
        if prediction_length == 0 {
            return Err(ForecastError::InvalidParameter {
                name: "prediction_length",
                reason: "must be at least 1".to_string(),
            });
        }
        if let Some(index) = context.iter().position(|v| !v.is_finite()) {
            return Err(ForecastError::NonFiniteValue(index));
        }

        let (level, trend, sigma) = self.fit(context);
        debug!(level, trend, sigma, "Fitted Holt model");

        let mut forecast = QuantileForecast {
            lower: Vec::with_capacity(prediction_length),
            point: Vec::with_capacity(prediction_length),
            upper: Vec::with_capacity(prediction_length),
        };
        for h in 1..=prediction_length {
            let point = level + h as f64 * trend;
            let half_width = self.z * sigma * (h as f64).sqrt();
            forecast.lower.push(point - half_width);
            forecast.point.push(point);
            forecast.upper.push(point + half_width);
        }

        Ok(forecast)
    }

    fn name(&self) -> &'static str {
        "holt"
    }
}
