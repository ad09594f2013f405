use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{DateTime, Local, SecondsFormat, SubsecRound, Utc};
use common::RawForecastPayload;
use compute::error::ForecastError;
use tracing::{debug, error, info, instrument, trace};

use crate::schemas::{AppState, ErrorResponse, ForecastQuery};

/// Failure while producing a payload
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    #[error("Forecast model failed: {0}")]
    Model(#[from] ForecastError),
    #[error("Sensor simulator is unavailable")]
    SimulatorPoisoned,
}

/// Get simulated temperature history and its forecast
#[utoipa::path(
    get,
    path = "/forecast",
    tag = "forecast",
    params(ForecastQuery),
    responses(
        (status = 200, description = "History and forecast generated successfully", body = RawForecastPayload),
        (status = 400, description = "Invalid query parameters", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_forecast(
    Valid(Query(query)): Valid<Query<ForecastQuery>>,
    State(state): State<AppState>,
) -> Result<Json<RawForecastPayload>, (StatusCode, Json<ErrorResponse>)> {
    trace!("Entering get_forecast function");

    let intervals = query.intervals.unwrap_or(state.config.history_intervals);
    let prediction_length = query
        .prediction_length
        .unwrap_or(state.config.prediction_length);

    // Create cache key
    let cache_key = format!("forecast_{}_{}", intervals, prediction_length);

    // Check cache first
    if let Some(payload) = state.cache.get(&cache_key).await {
        debug!("Serving forecast from cache: {}", cache_key);
        return Ok(Json(payload));
    }

    let end = Utc::now().trunc_subsecs(0);
    let payload = match build_forecast_payload(&state, end, intervals, prediction_length) {
        Ok(payload) => payload,
        Err(e) => {
            error!("Failed to build forecast payload: {}", e);
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(e.to_string(), "FORECAST_FAILED")),
            ));
        }
    };

    // Cache the result
    state.cache.insert(cache_key, payload.clone()).await;

    info!(
        "Generated forecast with {} history samples and {} forecast steps",
        intervals, prediction_length
    );
    Ok(Json(payload))
}

/// Simulates `intervals` readings ending at `end` and forecasts
/// `prediction_length` steps after them.
pub fn build_forecast_payload(
    state: &AppState,
    end: DateTime<Utc>,
    intervals: usize,
    prediction_length: usize,
) -> Result<RawForecastPayload, PayloadError> {
    let samples = state
        .simulator
        .lock()
        .map_err(|_| PayloadError::SimulatorPoisoned)?
        .generate(end, intervals, &Local)?;

    let history: Vec<f64> = samples.iter().map(|s| s.temperature).collect();
    let forecast = state.forecaster.predict(&history, prediction_length)?;

    let timestamps = samples
        .iter()
        .map(|s| s.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true))
        .collect();
    let actual = history.into_iter().map(Some).collect();

    Ok(RawForecastPayload::new(timestamps, actual, forecast.into_rows()))
}
