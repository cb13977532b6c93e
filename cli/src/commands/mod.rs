//! # Echo Bridge Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the top-level commands of the `echo-bridge` CLI and
//! makes them accessible to the main application entry point (`main.rs`).
//!
//! ## Commands
//!
//! - `send`: Submit one message and print the result view
//! - `health`: Probe the echo service's health endpoint
//! - `chat`: Interactive form; one submission per input line
//! - `serve`: Run the echo backend
//!
//! Each command defines its own arguments structure and handler function.
//!

/// One-shot submission of a single message.
pub mod send;
/// Health probe against `/api/health`.
pub mod health;
/// Interactive line-by-line session.
pub mod chat;
/// The echo backend (Axum server).
pub mod serve;
