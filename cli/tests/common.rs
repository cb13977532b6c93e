//! # Echo Bridge CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration test crates in `cli/tests/`. Every
//! command built here runs in an isolated working directory with its own
//! config home, so a developer's `.echo-bridge.toml` or user config cannot
//! leak into the assertions.
//!

// Allow potentially unused code in this common module, as different test files might use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// An address nothing listens on; connecting to it is refused immediately.
pub const UNREACHABLE_API_URL: &str = "http://127.0.0.1:1";

/// # Get Echo Bridge Command (`echo_bridge_cmd`)
///
/// Creates an `assert_cmd::Command` for the compiled `echo-bridge` binary.
///
/// ## Panics
/// Panics if the binary cannot be found via `Command::cargo_bin`.
pub fn echo_bridge_cmd() -> Command {
    Command::cargo_bin("echo-bridge").expect("Failed to find echo-bridge binary for testing")
}

/// Scratch directory used as both working directory and config home.
pub struct Sandbox {
    pub dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create sandbox dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `.echo-bridge.toml` into the sandbox root.
    pub fn write_project_config(&self, content: &str) {
        std::fs::write(self.path().join(".echo-bridge.toml"), content)
            .expect("Failed to write project config");
    }

    /// `echo-bridge` running inside the sandbox with no inherited API URL.
    pub fn cmd(&self) -> Command {
        let mut cmd = echo_bridge_cmd();
        cmd.current_dir(self.path())
            .env("HOME", self.path())
            .env("XDG_CONFIG_HOME", self.path().join(".config"))
            .env_remove("ECHO_BRIDGE_API_URL")
            .env_remove("RUST_LOG");
        cmd
    }
}
