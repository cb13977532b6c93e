//! # Echo Bridge Send Handler
//!
//! File: cli/src/commands/send.rs
//!
//! ## Overview
//!
//! This module implements the `echo-bridge send` command: a single cycle of
//! the bridge driven from the command line. The message argument goes through
//! the same input form and session the interactive `chat` command uses, so
//! validation, transport, and presentation behave identically.
//!
//! ## Architecture
//!
//! 1. Build an `EchoClient` from the resolved client configuration.
//! 2. Put the message into a fresh `EchoSession` and print the counter.
//! 3. Submit. A validation failure is returned as `EchoBridgeError::InvalidMessage`
//!    without any network traffic.
//! 4. Print the loading view, then the result view.
//! 5. A `Failure` result is returned as `EchoBridgeError::Echo` so the process
//!    exits with status 1.
//!
//! ## Usage
//!
//! ```bash
//! echo-bridge send "Hello, World!"
//! echo-bridge --api-url http://echo.internal:9000 send "ping"
//! ```
//!
use crate::common::bridge::{presenter, CycleState, EchoClient, EchoSession};
use crate::core::config::Config;
use crate::core::error::{EchoBridgeError, Result};
use clap::Parser;
use tracing::{debug, info};

/// # Send Arguments (`SendArgs`)
#[derive(Parser, Debug)]
#[command(about = "Send one message to the echo service and print the reply")]
pub struct SendArgs {
    /// The message to send (1 to 1000 characters after trimming whitespace).
    #[arg(allow_hyphen_values = true)]
    pub message: String,
}

/// # Handle Send Command (`handle_send`)
///
/// Runs one submit-to-resolution cycle for `args.message` and prints the
/// presenter output for each state the cycle passes through.
///
/// ## Returns
///
/// * `Ok(())` when the echo service answered successfully.
/// * `Err` with `EchoBridgeError::InvalidMessage` if the message was rejected
///   locally, or `EchoBridgeError::Echo` if the round trip failed.
pub async fn handle_send(args: SendArgs, config: &Config) -> Result<()> {
    debug!("Send args: {:?}", args);
    let client = EchoClient::new(&config.client)?;
    info!("Sending message to {}", client.base_url());

    let mut session = EchoSession::new(client);
    session.edit(args.message);
    println!("{}", session.form().counter());

    let state = session
        .submit_with(|s| println!("{}", presenter::render(s.state())))
        .await
        .map_err(EchoBridgeError::from)?;

    println!("{}", presenter::render(state));

    if let CycleState::Failure(err) = state {
        return Err(EchoBridgeError::from(err.clone()).into());
    }
    Ok(())
}
