//! # Echo Bridge Backend
//!
//! File: cli/src/commands/serve/mod.rs
//!
//! ## Overview
//!
//! `echo-bridge serve` runs the echo service the client talks to:
//! - `POST /api/echo` answers `Echo: <message>` or a structured error body
//! - `GET /api/health` answers a plain-text liveness string
//! - Port binding with automatic fallback if the port is in use
//! - Permissive CORS unless `--no-cors` is given
//!
//! ## Architecture
//!
//! - `handlers.rs`: Route handlers and the error-to-response mapping
//! - `server_logic.rs`: Router assembly, port selection and the serve loop
//!
//! Settings come from the `[server]` table of the layered configuration;
//! flags given here override it.
//!
//! ## Examples
//!
//! ```bash
//! # Serve on the configured address (127.0.0.1:8080 by default)
//! echo-bridge serve
//!
//! # Listen on every interface, port 9000, without CORS headers
//! echo-bridge serve --host 0.0.0.0 --port 9000 --no-cors
//! ```
//!
use crate::core::config::{Config, ServerSettings};
use crate::core::error::Result;
use clap::Parser;
use std::net::IpAddr;
use tracing::info;

/// Route handlers for the echo API.
pub mod handlers;

/// Contains the core Axum-based HTTP server implementation.
pub mod server_logic;

#[derive(Parser, Debug)]
#[command(about = "Run the echo backend the client talks to")]
pub struct ServeArgs {
    /// Host interface to bind (overrides `[server] host`).
    #[arg(long)]
    pub host: Option<IpAddr>,

    /// Port to listen on (overrides `[server] port`). The next free port is
    /// used when it is taken.
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Do not send CORS headers.
    #[arg(long)]
    pub no_cors: bool,
}

impl ServeArgs {
    /// Applies the flags on top of the configured server settings.
    fn apply(&self, settings: &ServerSettings) -> ServerSettings {
        ServerSettings {
            host: self.host.unwrap_or(settings.host),
            port: self.port.unwrap_or(settings.port),
            enable_cors: settings.enable_cors && !self.no_cors,
        }
    }
}

/// # Handle Serve Command (`handle_serve`)
///
/// Merges the flags with the `[server]` configuration and runs the backend
/// until shutdown.
///
/// ## Arguments
///
/// * `args`: Parsed `ServeArgs`.
/// * `config`: Effective configuration; only `config.server` is used.
///
/// ## Returns
///
/// * `Result<()>`: `Ok(())` after a graceful shutdown, or the error that
///   prevented the server from starting.
pub async fn handle_serve(args: ServeArgs, config: &Config) -> Result<()> {
    info!("Handling serve command with args: {:?}", args);

    let settings = args.apply(&config.server);
    info!("Effective server settings: {:?}", settings);

    server_logic::run_server(settings).await
}
