//! # Echo Bridge Interactive Session
//!
//! File: cli/src/commands/chat.rs
//!
//! ## Overview
//!
//! This module implements `echo-bridge chat`, the interactive form. Each line
//! read from stdin replaces the field content and submits it:
//!
//! - the live counter (`length/1000`) is printed after every edit;
//! - a blank line leaves submit disabled and shows the inline error;
//! - a rejected line prints the validation error and sends nothing;
//! - while a request is outstanding the loading view is shown, and no further
//!   input is read until the cycle settles;
//! - the result view is printed when the cycle settles.
//!
//! On failure the field keeps its content, so `:retry` resubmits it without
//! retyping. `:quit` or end of input ends the session.
//!
//! ## Usage
//!
//! ```bash
//! echo-bridge chat
//! echo-bridge --api-url http://localhost:9000 chat
//! ```
//!
use crate::common::bridge::{presenter, CycleState, EchoClient, EchoSession, EchoTransport};
use crate::core::config::Config;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, info};

const QUIT_COMMAND: &str = ":quit";
const RETRY_COMMAND: &str = ":retry";

#[derive(Parser, Debug)]
#[command(about = "Interactive session: each line you type is sent to the echo service")]
pub struct ChatArgs {}

/// # Handle Chat Command (`handle_chat`)
///
/// Wires stdin and stdout to [`run_chat`] with a real [`EchoClient`].
pub async fn handle_chat(_args: ChatArgs, config: &Config) -> Result<()> {
    let client = EchoClient::new(&config.client)?;
    info!("Starting chat session against {}", client.base_url());

    let session = EchoSession::new(client);
    let input = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    run_chat(input, &mut stdout, session).await
}

/// Drives a session from line-oriented input until `:quit` or end of input.
pub async fn run_chat<R, W, T>(input: R, out: &mut W, mut session: EchoSession<T>) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    T: EchoTransport,
{
    writeln!(out, "Echo Bridge")?;
    writeln!(
        out,
        "Type a message and press Enter to send it. {RETRY_COMMAND} resends the last failed message, {QUIT_COMMAND} exits."
    )?;
    writeln!(out, "{}", presenter::render(session.state()))?;
    out.flush()?;

    let mut lines = input.lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from input")?
    {
        let command = line.trim();
        if command == QUIT_COMMAND {
            break;
        } else if command == RETRY_COMMAND {
            debug!("Resubmitting kept field: {:?}", session.form().value());
        } else {
            session.edit(line);
            writeln!(out, "{}", session.form().counter())?;
        }

        if session.can_submit() {
            let mut loading_written = Ok(());
            let outcome = session
                .submit_with(|s| loading_written = writeln!(out, "{}", presenter::render(s.state())))
                .await;
            loading_written?;

            if let Ok(state) = outcome {
                writeln!(out, "{}", presenter::render(state))?;
                if matches!(state, CycleState::Failure(_)) {
                    writeln!(
                        out,
                        "Your message was kept ({} characters). Type {RETRY_COMMAND} to send it again.",
                        session.form().char_count()
                    )?;
                }
            }
        } else if let Err(err) = session.submit().await {
            // Submit is disabled for a blank field; this only records the inline error.
            debug!("Submit disabled: {}", err);
        }

        if let Some(err) = session.form().error() {
            writeln!(out, "⚠️  {}", err)?;
        }
        out.flush()?;
    }

    info!("Chat session ended");
    Ok(())
}
