use anyhow::Result;
use clap::{Parser, Subcommand};
use std::time::Duration;

pub mod commands;

use crate::config::ServiceConfig;
use commands::{ComposeOptions, compose, serve};

#[derive(Parser)]
#[command(name = "tempcast")]
#[command(about = "Water temperature forecast service and command-line composer")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the forecast web server
    Serve {
        /// Bind address for the web server
        ///
        /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
        #[arg(short, long, env = "BIND_ADDRESS", default_value = "0.0.0.0:3000")]
        bind_address: String,

        /// Number of 15-minute history samples per response
        #[arg(long, env = "TEMPCAST_HISTORY_INTERVALS", default_value_t = 48)]
        history_intervals: usize,

        /// Number of forecast steps per response
        #[arg(long, env = "TEMPCAST_PREDICTION_LENGTH", default_value_t = 24)]
        prediction_length: usize,

        /// Seconds a generated forecast is served from cache
        #[arg(long, env = "TEMPCAST_CACHE_TTL_SECS", default_value_t = 60)]
        cache_ttl_secs: u64,

        /// Seed for the sensor simulator, random when omitted
        #[arg(long, env = "TEMPCAST_SEED")]
        seed: Option<u64>,
    },
    /// Fetch a forecast and print the composed series
    ///
    /// Examples:
    ///   tempcast compose --url http://localhost:3000/forecast
    ///   tempcast compose --url http://localhost:3000/forecast --bands --retries 3
    Compose {
        /// Forecast endpoint URL
        #[arg(short, long, env = "TEMPCAST_FORECAST_URL", default_value = "http://localhost:3000/forecast")]
        url: String,

        /// Minutes between forecast points
        #[arg(short, long, default_value_t = compute::composer::DEFAULT_FORECAST_STEP_MINUTES)]
        step_minutes: u32,

        /// Retries after a transport failure or 5xx response
        #[arg(short, long, default_value_t = 0)]
        retries: u32,

        /// Request timeout in seconds
        #[arg(short, long, default_value_t = 10)]
        timeout_secs: u64,

        /// Include confidence bounds in the output
        #[arg(long)]
        bands: bool,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve {
                bind_address,
                history_intervals,
                prediction_length,
                cache_ttl_secs,
                seed,
            } => {
                let config = ServiceConfig {
                    bind_address,
                    history_intervals,
                    prediction_length,
                    cache_ttl: Duration::from_secs(cache_ttl_secs),
                    seed,
                };
                serve(config).await?;
            }
            Commands::Compose {
                url,
                step_minutes,
                retries,
                timeout_secs,
                bands,
            } => {
                let options = ComposeOptions {
                    url,
                    step_minutes,
                    retries,
                    timeout: Duration::from_secs(timeout_secs),
                    bands,
                };
                compose(&options).await?;
            }
        }
        Ok(())
    }
}
