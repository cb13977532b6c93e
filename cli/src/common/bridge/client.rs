//! # Transport Client
//!
//! Sends validated messages to the echo service over HTTP and normalizes every
//! failure into [`ApiError`].
//!
//! One request per call, no retries. The timeout from [`ClientConfig`] applies
//! to the whole request.

use std::future::Future;
use std::time::Duration;

use anyhow::Context;
use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::types::{now_timestamp, ApiError, EchoRequest, EchoResponse, NETWORK_ERROR};
use super::validation::Message;
use crate::core::config::ClientConfig;
use crate::core::error::Result;

pub const ECHO_PATH: &str = "/api/echo";
pub const HEALTH_PATH: &str = "/api/health";

/// Anything that can carry a message to the echo service.
pub trait EchoTransport {
    fn send(&self, message: &Message)
        -> impl Future<Output = std::result::Result<EchoResponse, ApiError>> + Send;
}

/// Failure of the liveness probe.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Health check failed: {0}")]
pub struct HealthError(pub String);

/// Error body fields the server may send; each one is optional.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
    timestamp: Option<String>,
}

/// HTTP client for the echo service.
#[derive(Debug, Clone)]
pub struct EchoClient {
    base_url: String,
    timeout: Duration,
    http: reqwest::Client,
}

impl EchoClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            base_url: config.api_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Posts `message` to `/api/echo`.
    pub async fn echo(&self, message: &str) -> std::result::Result<EchoResponse, ApiError> {
        let request = EchoRequest {
            message: message.to_string(),
        };
        info!("Making POST request to {}", ECHO_PATH);

        let response = self
            .http
            .post(self.url(ECHO_PATH))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!("Request error: {}", e);
                ApiError::network(self.describe(&e))
            })?;

        let status = response.status();
        info!("Received {} response from {}", status.as_u16(), ECHO_PATH);

        let body = response.text().await.map_err(|e| {
            warn!("Failed to read response body: {}", e);
            ApiError::network(self.describe(&e))
        })?;

        if !status.is_success() {
            return Err(error_from_response(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!("Unexpected response body from {}: {}", ECHO_PATH, e);
            ApiError::unknown(format!("Invalid response body: {e}"))
        })
    }

    /// Fetches the plain-text body of `/api/health`.
    pub async fn check_health(&self) -> std::result::Result<String, HealthError> {
        info!("Making GET request to {}", HEALTH_PATH);

        let response = self
            .http
            .get(self.url(HEALTH_PATH))
            .send()
            .await
            .map_err(|e| HealthError(self.describe(&e)))?;

        let status = response.status();
        info!("Received {} response from {}", status.as_u16(), HEALTH_PATH);
        if !status.is_success() {
            return Err(HealthError(status_failure(status)));
        }

        response.text().await.map_err(|e| HealthError(self.describe(&e)))
    }

    /// Human-readable description of a transport failure, including its causes.
    fn describe(&self, err: &reqwest::Error) -> String {
        if err.is_timeout() {
            return format!("timeout of {}ms exceeded", self.timeout.as_millis());
        }
        let mut description = err.to_string();
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            description.push_str(": ");
            description.push_str(&cause.to_string());
            source = cause.source();
        }
        description
    }
}

impl EchoTransport for EchoClient {
    async fn send(&self, message: &Message) -> std::result::Result<EchoResponse, ApiError> {
        self.echo(message.as_str()).await
    }
}

fn status_failure(status: StatusCode) -> String {
    format!("Request failed with status code {}", status.as_u16())
}

/// Maps a non-2xx response onto `ApiError`, falling back per field when the
/// body is missing or only partially structured.
fn error_from_response(status: StatusCode, body: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_else(|e| {
        debug!("Error response body is not structured JSON: {}", e);
        ErrorBody::default()
    });
    ApiError {
        error: non_empty(parsed.error).unwrap_or_else(|| NETWORK_ERROR.to_string()),
        message: non_empty(parsed.message).unwrap_or_else(|| status_failure(status)),
        status: status.as_u16(),
        timestamp: non_empty(parsed.timestamp).unwrap_or_else(now_timestamp),
    }
}

/// Empty strings count as missing.
fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}
