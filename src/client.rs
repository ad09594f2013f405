//! Native client for the forecast endpoint.
//!
//! Fetch failures are reported as [`ClientError`] and never reach the
//! composer. Retries live here, above the composer.

use common::RawForecastPayload;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Transport-level failures, kept apart from payload validation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection, timeout or body read failure
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-2xx status
    #[error("HTTP error: {0}")]
    Status(StatusCode),

    /// The body is not a JSON document
    #[error("Failed to parse response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The client itself could not be built
    #[error("Invalid client configuration: {0}")]
    Build(#[source] reqwest::Error),
}

impl ClientError {
    /// Transport failures and server-side errors are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Transport(_) => true,
            ClientError::Status(status) => status.is_server_error(),
            ClientError::Decode(_) | ClientError::Build(_) => false,
        }
    }
}

/// Exponential backoff between attempts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Attempts after the first one
    pub max_retries: u32,
    /// Delay before the first retry, doubled each time
    pub initial_backoff: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::ZERO,
        }
    }

    pub fn new(max_retries: u32, initial_backoff: Duration) -> Self {
        Self {
            max_retries,
            initial_backoff,
        }
    }

    /// Delay before retry number `retry` (starting at 1).
    pub fn backoff(&self, retry: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(2u32.saturating_pow(retry.saturating_sub(1)))
    }
}

#[derive(Debug, Clone)]
pub struct ForecastClient {
    http: reqwest::Client,
    url: String,
    retry: RetryPolicy,
}

impl ForecastClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ClientError::Build)?;

        Ok(Self {
            http,
            url: url.into(),
            retry: RetryPolicy::none(),
        })
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the payload, retrying retryable failures per the policy.
    #[instrument(skip(self), fields(url = %self.url))]
    pub async fn fetch(&self) -> Result<RawForecastPayload, ClientError> {
        let mut retry = 0;
        loop {
            match self.fetch_once().await {
                Ok(payload) => {
                    info!("GET {} - Success", self.url);
                    return Ok(payload);
                }
                Err(e) if e.is_retryable() && retry < self.retry.max_retries => {
                    retry += 1;
                    let delay = self.retry.backoff(retry);
                    warn!("GET {} - {} (retry {} in {:?})", self.url, e, retry, delay);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    warn!("GET {} - {}", self.url, e);
                    return Err(e);
                }
            }
        }
    }

    async fn fetch_once(&self) -> Result<RawForecastPayload, ClientError> {
        debug!("GET request to: {}", self.url);

        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status));
        }

        let body = response.bytes().await.map_err(ClientError::Transport)?;
        serde_json::from_slice(&body).map_err(ClientError::Decode)
    }
}
