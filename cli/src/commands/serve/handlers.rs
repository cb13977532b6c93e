//! # Echo Backend Request Handlers
//!
//! File: cli/src/commands/serve/handlers.rs
//!
//! ## Overview
//!
//! Route handlers for the echo backend and the mapping of every failure onto
//! the JSON error body the client understands (`ApiError`):
//!
//! - `POST /api/echo`: validates the message and answers `Echo: <message>`.
//! - `GET /api/health`: plain-text liveness answer.
//!
//! | Failure                         | Status | `error`                 |
//! |---------------------------------|--------|-------------------------|
//! | blank, missing or null message  | 400    | `Validation failed`     |
//! | message over 1000 characters    | 400    | `Validation failed`     |
//! | body is not valid JSON          | 4xx    | `Malformed request`     |
//! | handler panic                   | 500    | `Internal server error` |
//!
use crate::common::bridge::{ApiError, EchoResponse, ValidationError, MAX_MESSAGE_CHARS};
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use serde::Deserialize;
use std::any::Any;
use thiserror::Error;
use tracing::{error, info, warn};

pub const HEALTH_BODY: &str = "Echo Bridge Backend is running!";
pub const ECHO_PREFIX: &str = "Echo: ";

const RESPONSE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const ERROR_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// Request body of `POST /api/echo`. `message` may be absent or null, which
/// is reported as a validation failure rather than a malformed request.
#[derive(Debug, Deserialize)]
pub struct EchoPayload {
    #[serde(default)]
    message: Option<String>,
}

/// Everything a handler can fail with.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("{{message={0}}}")]
    Validation(String),

    #[error("{detail}")]
    MalformedRequest { status: StatusCode, detail: String },

    #[error("{0}")]
    Internal(String),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            ServerError::Validation(_) => StatusCode::BAD_REQUEST,
            ServerError::MalformedRequest { status, .. } => *status,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn category(&self) -> &'static str {
        match self {
            ServerError::Validation(_) => "Validation failed",
            ServerError::MalformedRequest { .. } => "Malformed request",
            ServerError::Internal(_) => "Internal server error",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ApiError {
            error: self.category().to_string(),
            message: self.to_string(),
            status: status.as_u16(),
            timestamp: Local::now().format(ERROR_TIMESTAMP_FORMAT).to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Unreadable bodies keep the extractor's 4xx status instead of a 500.
impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::MalformedRequest {
            status: rejection.status(),
            detail: rejection.body_text(),
        }
    }
}

fn reason(err: ValidationError) -> String {
    match err {
        ValidationError::Required => "Message cannot be empty".to_string(),
        ValidationError::TooLong => {
            format!("Message cannot exceed {MAX_MESSAGE_CHARS} characters")
        }
    }
}

/// Server-side message rules. Blank is judged on the trimmed text, length on
/// the message exactly as received.
fn check_message(message: &str) -> Result<(), ValidationError> {
    if message.trim().is_empty() {
        return Err(ValidationError::Required);
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ValidationError::TooLong);
    }
    Ok(())
}

/// `POST /api/echo`
pub async fn echo(
    payload: Result<Json<EchoPayload>, JsonRejection>,
) -> Result<Json<EchoResponse>, ServerError> {
    let Json(payload) = payload.map_err(|rejection| {
        warn!("Rejected echo request body: {}", rejection.body_text());
        ServerError::from(rejection)
    })?;

    let message = payload.message.unwrap_or_default();
    if let Err(err) = check_message(&message) {
        warn!("Echo request failed validation: {}", err);
        return Err(ServerError::Validation(reason(err)));
    }

    info!("Echoing message of {} characters", message.chars().count());
    Ok(Json(EchoResponse {
        echo: format!("{ECHO_PREFIX}{message}"),
        timestamp: Local::now().format(RESPONSE_TIMESTAMP_FORMAT).to_string(),
    }))
}

/// `GET /api/health`
pub async fn health() -> &'static str {
    HEALTH_BODY
}

/// Response used by the panic-catching layer.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(text) = panic.downcast_ref::<String>() {
        text.clone()
    } else if let Some(text) = panic.downcast_ref::<&str>() {
        text.to_string()
    } else {
        "Unknown panic".to_string()
    };
    error!("Handler panicked: {}", detail);
    ServerError::Internal(detail).into_response()
}
