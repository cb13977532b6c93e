//! # Echo Bridge Client Components (`common::bridge`)
//!
//! File: cli/src/common/bridge/mod.rs
//!
//! ## Overview
//!
//! This module holds the client side of the bridge, shared by the `send`,
//! `health` and `chat` commands:
//!
//! - **`form`**: The Input Collector. A single text field with a live
//!   `length/1000` counter and inline validation errors.
//! - **`client`**: The Transport Client. Posts messages to `/api/echo`, probes
//!   `/api/health`, and normalizes failures into `ApiError`.
//! - **`presenter`**: The Result Presenter. Renders the current cycle state.
//! - **`session`**: Ties the three together and owns the cycle state.
//! - **`types`**, **`validation`**, **`cycle`**: Wire types, message rules, and
//!   the `Idle | Loading | Success | Failure` state.
//!
//! ## Usage
//!
//! ```rust
//! let client = EchoClient::new(&config.client)?;
//! let mut session = EchoSession::new(client);
//! session.edit("hello");
//! let state = session.submit().await?;
//! println!("{}", presenter::render(state));
//! ```
//!

pub mod client;
pub mod cycle;
pub mod form;
pub mod presenter;
pub mod session;
pub mod types;
pub mod validation;

pub use client::{EchoClient, EchoTransport, HealthError};
pub use cycle::CycleState;
pub use session::EchoSession;
pub use types::{ApiError, EchoResponse};
pub use validation::{ValidationError, MAX_MESSAGE_CHARS};

#[cfg(test)]
pub mod testing;
