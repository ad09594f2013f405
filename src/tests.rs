#[cfg(test)]
mod integration_tests {
    use crate::handlers::forecast::{PayloadError, build_forecast_payload};
    use crate::router::create_router;
    use crate::schemas::{ErrorResponse, HealthResponse};
    use crate::test_utils::test_utils::{init_test_tracing, setup_test_app, setup_test_app_state};
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use common::{ForecastBand, RawForecastPayload};
    use compute::composer::ForecastComposer;

    fn poison(state: &crate::schemas::AppState) {
        let simulator = state.simulator.clone();
        let _ = std::thread::spawn(move || {
            let _guard = simulator.lock().unwrap();
            panic!("simulator crashed");
        })
        .join();
    }

    #[tokio::test]
    async fn test_health_check() {
        let _guard = init_test_tracing();
        let server = TestServer::new(setup_test_app()).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
        assert_eq!(body.model, "holt");
        assert_eq!(body.version, env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_health_check_reports_poisoned_simulator() {
        let state = setup_test_app_state();
        poison(&state);
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "SIMULATOR_UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_get_forecast_default_shape() {
        let server = TestServer::new(setup_test_app()).unwrap();

        let response = server.get("/forecast").await;

        response.assert_status(StatusCode::OK);
        let payload: RawForecastPayload = response.json();
        let timestamps = payload.timestamps.as_ref().unwrap();
        assert_eq!(timestamps.len(), 48);
        assert_eq!(payload.actual.as_ref().unwrap().len(), 48);
        assert!(timestamps.iter().all(|t| t.ends_with('Z')));

        let rows = payload.forecast.as_ref().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(payload.band_values(ForecastBand::Point).unwrap().len(), 24);
    }

    #[tokio::test]
    async fn test_get_forecast_with_query_parameters() {
        let server = TestServer::new(setup_test_app()).unwrap();

        let response = server
            .get("/forecast")
            .add_query_param("intervals", 8)
            .add_query_param("prediction_length", 4)
            .await;

        response.assert_status(StatusCode::OK);
        let payload: RawForecastPayload = response.json();
        assert_eq!(payload.timestamps.as_ref().unwrap().len(), 8);
        for band in [ForecastBand::Lower, ForecastBand::Point, ForecastBand::Upper] {
            assert_eq!(payload.band_values(band).unwrap().len(), 4);
        }
    }

    #[tokio::test]
    async fn test_get_forecast_rejects_out_of_range_query() {
        let server = TestServer::new(setup_test_app()).unwrap();

        server
            .get("/forecast")
            .add_query_param("intervals", 2)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .get("/forecast")
            .add_query_param("prediction_length", 500)
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .get("/forecast")
            .add_query_param("intervals", "many")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_forecast_is_cached_per_query() {
        let state = setup_test_app_state();
        let server = TestServer::new(create_router(state.clone())).unwrap();

        let first: RawForecastPayload = server.get("/forecast").await.json();
        let second: RawForecastPayload = server.get("/forecast").await.json();
        assert_eq!(first, second);

        server
            .get("/forecast")
            .add_query_param("intervals", 16)
            .await
            .assert_status(StatusCode::OK);

        state.cache.run_pending_tasks().await;
        assert_eq!(state.cache.entry_count(), 2);
    }

    #[tokio::test]
    async fn test_get_forecast_fails_with_poisoned_simulator() {
        let state = setup_test_app_state();
        poison(&state);
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server.get("/forecast").await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorResponse = response.json();
        assert!(!body.success);
        assert_eq!(body.code, "FORECAST_FAILED");
    }

    #[test]
    fn test_build_forecast_payload_ends_at_requested_instant() {
        let state = setup_test_app_state();
        let end = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();

        let payload = build_forecast_payload(&state, end, 12, 6).unwrap();

        let timestamps = payload.timestamps.unwrap();
        assert_eq!(timestamps.last().unwrap(), "2024-03-10T12:00:00Z");
        let first: DateTime<Utc> = timestamps[0].parse().unwrap();
        assert_eq!(end - first, Duration::minutes(15 * 11));
    }

    #[test]
    fn test_build_forecast_payload_reports_poisoned_simulator() {
        let state = setup_test_app_state();
        poison(&state);

        let err = build_forecast_payload(&state, Utc::now(), 12, 6).unwrap_err();
        assert!(matches!(err, PayloadError::SimulatorPoisoned));
    }

    #[tokio::test]
    async fn test_served_payload_composes_into_chart_series() {
        let server = TestServer::new(setup_test_app()).unwrap();

        let payload: RawForecastPayload = server
            .get("/forecast")
            .add_query_param("intervals", 16)
            .add_query_param("prediction_length", 8)
            .await
            .json();

        let composer = ForecastComposer::new(Utc).with_confidence_bands(true);
        let composed = composer.compose(&payload, Utc::now()).unwrap();

        assert_eq!(composed.len(), 24);
        assert!(composed.series[..16].iter().all(|p| p.actual.is_some() && p.forecast.is_none()));
        assert!(composed.series[16..].iter().all(|p| p.actual.is_none() && p.forecast.is_some()));
        assert!(composed.series[16..].iter().all(|p| p.confidence_lower <= p.forecast && p.forecast <= p.confidence_upper));
        assert_eq!(composed.latest_actual, composed.series[15].actual);
        assert_eq!(
            composed.series[16].instant - composed.series[15].instant,
            Duration::minutes(15)
        );
    }
}
