#[cfg(test)]
mod tests {
    use crate::schemas::ApiDoc;
    use utoipa::OpenApi;
    use utoipa::openapi::{PathItemType, RefOr, schema::Schema};

    fn object_properties(name: &str) -> Vec<String> {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();
        match components.schemas.get(name) {
            Some(RefOr::T(Schema::Object(obj))) => obj.properties.keys().cloned().collect(),
            _ => panic!("{} should be an object schema", name),
        }
    }

    #[test]
    fn test_openapi_schema_generation() {
        let openapi = ApiDoc::openapi();
        let components = openapi.components.as_ref().unwrap();

        for name in [
            "ErrorResponse",
            "HealthResponse",
            "RawForecastPayload",
            "ComposedForecast",
            "TimeSeriesPoint",
        ] {
            assert!(components.schemas.contains_key(name), "missing schema {}", name);
        }

        assert!(serde_json::to_string(&openapi).is_ok());
    }

    #[test]
    fn test_error_response_schema_structure() {
        let properties = object_properties("ErrorResponse");
        for field in ["error", "code", "success"] {
            assert!(properties.iter().any(|p| p == field));
        }
    }

    #[test]
    fn test_health_response_schema_structure() {
        let properties = object_properties("HealthResponse");
        for field in ["status", "version", "model", "cached_forecasts"] {
            assert!(properties.iter().any(|p| p == field));
        }
    }

    #[test]
    fn test_payload_schema_matches_wire_names() {
        let properties = object_properties("RawForecastPayload");
        assert_eq!(properties.len(), 3);
        for field in ["timestamps", "actual", "forecast"] {
            assert!(properties.iter().any(|p| p == field));
        }
    }

    #[test]
    fn test_series_point_schema_is_camel_case() {
        let properties = object_properties("TimeSeriesPoint");
        for field in ["time", "actual", "forecast", "confidenceLower", "confidenceUpper"] {
            assert!(properties.iter().any(|p| p == field));
        }
        assert!(!properties.iter().any(|p| p == "confidence_lower"));
    }

    #[test]
    fn test_openapi_paths_contain_health_endpoint() {
        let openapi = ApiDoc::openapi();
        let health_path = openapi.paths.paths.get("/health").unwrap();
        let health_get = health_path.operations.get(&PathItemType::Get).unwrap();

        assert!(health_get.responses.responses.contains_key("200"));
        assert!(health_get.responses.responses.contains_key("500"));
    }

    #[test]
    fn test_openapi_paths_contain_forecast_endpoint() {
        let openapi = ApiDoc::openapi();
        let forecast_path = openapi.paths.paths.get("/forecast").unwrap();
        let forecast_get = forecast_path.operations.get(&PathItemType::Get).unwrap();

        for status in ["200", "400", "500"] {
            assert!(forecast_get.responses.responses.contains_key(status));
        }

        let parameters = forecast_get.parameters.as_ref().unwrap();
        let names: Vec<_> = parameters.iter().map(|p| p.name.as_str()).collect();
        assert!(names.contains(&"intervals"));
        assert!(names.contains(&"prediction_length"));
    }

    #[test]
    fn test_all_error_responses_reference_correct_schema() {
        let openapi_json = serde_json::to_string(&ApiDoc::openapi()).unwrap();

        assert!(!openapi_json.contains("crate.schemas.ErrorResponse"));
        assert!(!openapi_json.contains("crate::schemas::ErrorResponse"));
        assert!(openapi_json.contains("ErrorResponse"));
    }
}
