pub mod axis;
pub mod composer;
pub mod error;
pub mod forecaster;
#[cfg(feature = "simulator")]
pub mod generator;

use chrono::Local;
use composer::{DEFAULT_FORECAST_STEP_MINUTES, ForecastComposer};
use forecaster::HoltForecaster;

pub use composer::compose;
pub use error::{ForecastError, ValidationError};

/// Returns the composer used by the dashboard: local time zone, 15-minute
/// forecast step, confidence bands off.
pub fn default_composer() -> ForecastComposer<Local> {
    ForecastComposer::local().with_step_minutes(DEFAULT_FORECAST_STEP_MINUTES)
}

/// Returns the forecasting model used by the forecast service.
pub fn default_forecaster() -> HoltForecaster {
    HoltForecaster::default()
}
