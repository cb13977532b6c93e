//! # Echo Bridge Health Handler
//!
//! File: cli/src/commands/health.rs
//!
//! ## Overview
//!
//! Implements `echo-bridge health`, a liveness probe against
//! `GET {api_url}/api/health`. The plain-text body is printed on success; any
//! failure (no response, timeout, non-2xx) is reported as
//! "Health check failed: ..." and the process exits with status 1.
//!
use crate::common::bridge::EchoClient;
use crate::core::config::Config;
use crate::core::error::{EchoBridgeError, Result};
use clap::Parser;
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Check that the echo service is reachable")]
pub struct HealthArgs {}

pub async fn handle_health(_args: HealthArgs, config: &Config) -> Result<()> {
    let client = EchoClient::new(&config.client)?;
    info!("Checking health of {}", client.base_url());

    let body = client
        .check_health()
        .await
        .map_err(EchoBridgeError::from)?;
    println!("{}", body);
    Ok(())
}
