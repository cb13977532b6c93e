//! # Echo Bridge Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file serves as the main entry point for the Echo Bridge CLI.
//! It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Resolving the layered configuration (flags/env, project file, user file)
//! - Routing execution to the appropriate command handler
//!
//! ## Architecture
//!
//! - Each command (`send`, `health`, `chat`, `serve`) is a variant in the `Commands` enum
//! - Commands are mapped to handler functions in their respective modules
//! - All errors are propagated to this level for consistent handling
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! echo-bridge --help
//!
//! # Send one message with request logging enabled
//! echo-bridge -v send "Hello, World!"
//!
//! # Point the client at another backend
//! ECHO_BRIDGE_API_URL=http://localhost:9000 echo-bridge chat
//! ```
//!
//! Command processing flow:
//! 1. Parse command-line args via Clap
//! 2. Configure logging based on verbosity level
//! 3. Load configuration, applying `--api-url`/`--timeout` on top
//! 4. Route to the command handler
//! 5. Format and display any errors that occur
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Command handlers (send, health, chat, serve)
mod common; // The bridge: validation, form, client, session, presenter
mod core; // Core infrastructure (errors, config)

use crate::core::config::{self, ClientOverrides};

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "echo-bridge",
    about = "📡 Echo Bridge: send a message to an echo service and see the reply",
    long_about = "Submit messages to an echo HTTP service, check its health, or run the\n\
                  echo backend itself.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Base URL of the echo service.
    #[arg(long, global = true, env = "ECHO_BRIDGE_API_URL")]
    api_url: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, global = true)]
    timeout: Option<u64>,
}

/// Enum defining all available top-level commands.
#[derive(Parser, Debug)]
enum Commands {
    #[command(alias = "s")]
    Send(commands::send::SendArgs),
    Health(commands::health::HealthArgs),
    #[command(alias = "c")]
    Chat(commands::chat::ChatArgs),
    Serve(commands::serve::ServeArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let overrides = ClientOverrides {
        api_url: cli.api_url,
        timeout_secs: cli.timeout,
    };

    let command_result = dispatch(cli.command, &overrides).await;

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Resolves the configuration and runs the selected command.
async fn dispatch(command: Commands, overrides: &ClientOverrides) -> crate::core::error::Result<()> {
    let config = config::load_config(overrides)?;
    tracing::debug!("Effective configuration: {:?}", config);

    match command {
        Commands::Send(args) => commands::send::handle_send(args, &config).await,
        Commands::Health(args) => commands::health::handle_health(args, &config).await,
        Commands::Chat(args) => commands::chat::handle_chat(args, &config).await,
        Commands::Serve(args) => commands::serve::handle_serve(args, &config).await,
    }
}
