//! # Echo Bridge Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the application-level error type used throughout
//! Echo Bridge. The bridge itself has its own narrower error contracts
//! (`ValidationError`, `ApiError`, `HealthError` in `common::bridge`); those are
//! what the Result Presenter and the chat session render. `EchoBridgeError`
//! covers everything that ends a command: bad configuration, a rejected
//! message on the one-shot `send` path, a failed round trip, or a server
//! start-up failure.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `EchoBridgeError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! ## Examples
//!
//! ```rust
//! // Return a specific error type
//! if config.client.timeout_secs == 0 {
//!     return Err(EchoBridgeError::Config("timeout_secs must be greater than 0".into()))?;
//! }
//!
//! // Add context to errors using anyhow
//! let content = fs::read_to_string(&path)
//!     .with_context(|| format!("Failed to read file: {}", path.display()))?;
//! ```
//!
use crate::common::bridge::{ApiError, HealthError, ValidationError};
use thiserror::Error;

/// Custom error type for the Echo Bridge application.
#[derive(Error, Debug)]
pub enum EchoBridgeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid message: {source}")]
    InvalidMessage {
        #[from]
        source: ValidationError,
    },

    #[error("Echo request failed: {source}")]
    Echo {
        #[from]
        source: ApiError,
    },

    #[error("{source}")]
    Health {
        #[from]
        source: HealthError,
    },

    #[error("Server error: {0}")]
    Server(String),
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
