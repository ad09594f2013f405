#[cfg(test)]
pub mod test_utils {
    use crate::config::{ServiceConfig, initialize_app_state};
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use std::time::Duration;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Seed shared by tests that need reproducible readings
    pub const TEST_SEED: u64 = 7;

    /// Configuration used by handler tests
    pub fn test_config() -> ServiceConfig {
        ServiceConfig {
            bind_address: "127.0.0.1:0".to_string(),
            history_intervals: 48,
            prediction_length: 24,
            cache_ttl: Duration::from_secs(60),
            seed: Some(TEST_SEED),
        }
    }

    /// Create AppState for testing
    pub fn setup_test_app_state() -> AppState {
        initialize_app_state(test_config()).expect("Failed to initialize test app state")
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is taken from RUST_LOG, defaulting to WARN.
    pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub fn setup_test_app() -> Router {
        create_router(setup_test_app_state())
    }
}
