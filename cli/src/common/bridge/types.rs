//! Wire types shared by the transport client and the echo backend.

use chrono::Local;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category used whenever no HTTP response (or no usable body) was received.
pub const NETWORK_ERROR: &str = "Network Error";
/// Category used for failures that fit no other shape.
pub const UNKNOWN_ERROR: &str = "Unknown Error";

/// Body of `POST /api/echo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoRequest {
    pub message: String,
}

/// Successful reply of `POST /api/echo`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EchoResponse {
    pub echo: String,
    pub timestamp: String,
}

/// The uniform failure shape rendered by the Result Presenter.
///
/// `status` is the HTTP status code, or `0` when no response was received.
/// The backend serializes its error bodies with the same struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{error}: {message}")]
pub struct ApiError {
    pub error: String,
    pub message: String,
    pub status: u16,
    pub timestamp: String,
}

impl ApiError {
    /// A failure where the request never produced an HTTP response.
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            error: NETWORK_ERROR.to_string(),
            message: message.into(),
            status: 0,
            timestamp: now_timestamp(),
        }
    }

    /// A failure that is neither an HTTP error nor a network error.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self {
            error: UNKNOWN_ERROR.to_string(),
            message: message.into(),
            status: 0,
            timestamp: now_timestamp(),
        }
    }
}

/// Current local time as an RFC 3339 string.
pub fn now_timestamp() -> String {
    Local::now().to_rfc3339()
}
