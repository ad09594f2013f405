use anyhow::{Context, Result};
use compute::default_forecaster;
use compute::generator::{SimulatorProfile, WaterHeaterSimulator};
use moka::future::Cache;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use validator::Validate;

use crate::schemas::AppState;

/// Settings of the forecast service, resolved from CLI arguments and the
/// environment.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct ServiceConfig {
    /// Address the HTTP server binds to
    pub bind_address: String,
    /// Default number of history samples per response
    #[validate(range(min = 4, max = 672))]
    pub history_intervals: usize,
    /// Default number of forecast steps per response
    #[validate(range(min = 1, max = 192))]
    pub prediction_length: usize,
    /// How long a generated payload is served from cache
    pub cache_ttl: Duration,
    /// Simulator seed; random when `None`
    pub seed: Option<u64>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
            history_intervals: 48,
            prediction_length: 24,
            cache_ttl: Duration::from_secs(60),
            seed: None,
        }
    }
}

/// Initialize application state from the service configuration
pub fn initialize_app_state(config: ServiceConfig) -> Result<AppState> {
    config
        .validate()
        .context("Invalid service configuration")?;

    let profile = SimulatorProfile::default();
    let simulator = match config.seed {
        Some(seed) => {
            tracing::info!("Using seeded sensor simulator (seed {})", seed);
            WaterHeaterSimulator::with_seed(profile, seed)
        }
        None => WaterHeaterSimulator::new(profile),
    }
    .context("Failed to create sensor simulator")?;

    // Initialize cache
    let cache = Cache::builder()
        .max_capacity(100)
        .time_to_live(config.cache_ttl)
        .build();

    Ok(AppState {
        config: Arc::new(config),
        simulator: Arc::new(Mutex::new(simulator)),
        forecaster: Arc::new(default_forecaster()),
        cache,
    })
}
