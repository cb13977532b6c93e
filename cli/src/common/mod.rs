//! # Echo Bridge Common Components (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! This module is the organizational entry point for code shared across
//! commands, keeping it separate from command-specific logic (`commands::`)
//! and core infrastructure (`core::`).
//!
//! - **`bridge`**: The client side of Echo Bridge (input form, transport
//!   client, result presenter, session).
//!

/// Client-side components: validation, form, transport, presenter, session.
pub mod bridge;
