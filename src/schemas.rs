use common::{ComposedForecast, RawForecastPayload, TimeSeriesPoint};
use compute::forecaster::Forecaster;
use compute::generator::WaterHeaterSimulator;
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use utoipa::{IntoParams, OpenApi, ToSchema};
use validator::Validate;

use crate::config::ServiceConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Resolved service configuration
    pub config: Arc<ServiceConfig>,
    /// Source of simulated sensor history
    pub simulator: Arc<Mutex<WaterHeaterSimulator>>,
    /// Model producing the forecast rows
    pub forecaster: Arc<dyn Forecaster>,
    /// Recently generated payloads keyed by query
    pub cache: Cache<String, RawForecastPayload>,
}

/// Query parameters for the forecast endpoint
#[derive(Debug, Default, Deserialize, Serialize, ToSchema, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct ForecastQuery {
    /// Number of 15-minute history samples (default from configuration)
    #[validate(range(min = 4, max = 672))]
    pub intervals: Option<usize>,
    /// Number of forecast steps (default from configuration)
    #[validate(range(min = 1, max = 192))]
    pub prediction_length: Option<usize>,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            success: false,
        }
    }
}

/// Health check response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Forecasting model in use
    pub model: String,
    /// Payloads currently held in cache
    pub cached_forecasts: u64,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::forecast::get_forecast,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            ForecastQuery,
            RawForecastPayload,
            ComposedForecast,
            TimeSeriesPoint,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "forecast", description = "Water temperature forecast endpoints"),
    ),
    info(
        title = "tempcast API",
        description = "Water temperature history and forecast for the building dashboard",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
