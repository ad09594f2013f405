use axum::{extract::State, http::StatusCode, response::Json};
use tracing::{error, instrument};
use crate::schemas::{AppState, ErrorResponse, HealthResponse};

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 500, description = "Service is unhealthy", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<ErrorResponse>)> {
    // A poisoned simulator can no longer serve forecasts
    if state.simulator.is_poisoned() {
        error!("Sensor simulator is poisoned");
        return Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new("Sensor simulator is unavailable", "SIMULATOR_UNAVAILABLE")),
        ));
    }

    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.forecaster.name().to_string(),
        cached_forecasts: state.cache.entry_count(),
    };

    Ok(Json(response))
}
