//! # Echo Bridge Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module implements configuration loading for Echo Bridge. Settings for
//! both sides of the bridge live here: where the client sends messages (and
//! how long it waits), and where the echo backend listens.
//!
//! ## Architecture
//!
//! Configuration sources (in order of precedence):
//! 1. Command-line flags (`--api-url`, `--timeout`) and the `ECHO_BRIDGE_API_URL`
//!    environment variable (resolved by clap before reaching this module)
//! 2. Project-specific `.echo-bridge.toml` in the current directory or ancestors
//! 3. User-specific `<config dir>/echo-bridge/config.toml`
//! 4. Default values defined in the code
//!
//! File sections are read into all-optional structs so that a project file
//! can override a single key without restating the rest.
//!
//! ## Examples
//!
//! ```rust
//! let cfg = config::load_config(&ClientOverrides::default())?;
//! let client = EchoClient::new(&cfg.client)?;
//! ```
//!
use crate::core::error::{EchoBridgeError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Base URL used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8080";
/// Fixed request timeout of the transport client, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Default port of the echo backend.
pub const DEFAULT_SERVER_PORT: u16 = 8080;

const PROJECT_CONFIG_FILENAME: &str = ".echo-bridge.toml";

/// The effective configuration after all sources have been merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub client: ClientConfig,
    pub server: ServerSettings,
}

/// Settings for the transport client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the echo service, without a trailing slash.
    pub api_url: String,
    /// Timeout applied to every request.
    pub timeout: Duration,
}

/// Settings for the echo backend (`echo-bridge serve`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub host: IpAddr,
    pub port: u16,
    pub enable_cors: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            client: ClientConfig {
                api_url: DEFAULT_API_URL.to_string(),
                timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            },
            server: ServerSettings {
                host: IpAddr::V4(Ipv4Addr::LOCALHOST),
                port: DEFAULT_SERVER_PORT,
                enable_cors: true,
            },
        }
    }
}

/// Client settings supplied on the command line (or through the environment).
#[derive(Debug, Clone, Default)]
pub struct ClientOverrides {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Represents one configuration file as written on disk.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)] // Error if unknown fields are in TOML
struct FileConfig {
    #[serde(default)]
    client: ClientFileConfig,
    #[serde(default)]
    server: ServerFileConfig,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct ClientFileConfig {
    api_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields)]
struct ServerFileConfig {
    host: Option<IpAddr>,
    port: Option<u16>,
    enable_cors: Option<bool>,
}

/// Loads the configuration using the real user config directory and the
/// current working directory as the start of the project file search.
pub fn load_config(overrides: &ClientOverrides) -> Result<Config> {
    let user_config_path = user_config_path();
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    load_config_from(user_config_path.as_deref(), &current_dir, overrides)
}

/// Loads, merges and validates configuration from explicit locations.
pub fn load_config_from(
    user_config_path: Option<&Path>,
    search_start: &Path,
    overrides: &ClientOverrides,
) -> Result<Config> {
    let user_config = match user_config_path {
        Some(path) if path.is_file() => {
            info!("Loading user configuration from: {}", path.display());
            Some(load_config_from_path(path)?)
        }
        Some(path) => {
            debug!("User configuration file not found at {}", path.display());
            None
        }
        None => None,
    };

    let project_config = match find_project_config_path(search_start) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            Some(load_config_from_path(&path)?)
        }
        None => {
            debug!("No project configuration file ({PROJECT_CONFIG_FILENAME}) found.");
            None
        }
    };

    let merged = merge_configs(user_config.unwrap_or_default(), project_config);
    let mut config = resolve(merged, overrides);
    config.client.api_url = normalize_api_url(&config.client.api_url);
    validate_config(&config).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn user_config_path() -> Option<PathBuf> {
    match ProjectDirs::from("com", "EchoBridge", "echo-bridge") {
        Some(proj_dirs) => Some(proj_dirs.config_dir().join("config.toml")),
        None => {
            warn!("Could not determine user config directory.");
            None
        }
    }
}

fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    let mut path: &Path = start;
    loop {
        let project_config = path.join(PROJECT_CONFIG_FILENAME);
        if project_config.is_file() {
            return Some(project_config);
        }
        if path.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                path.display()
            );
            return None;
        }
        path = path.parent()?;
    }
}

fn load_config_from_path(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Project values win over user values, key by key.
fn merge_configs(user: FileConfig, project: Option<FileConfig>) -> FileConfig {
    let Some(project) = project else {
        return user;
    };
    FileConfig {
        client: ClientFileConfig {
            api_url: project.client.api_url.or(user.client.api_url),
            timeout_secs: project.client.timeout_secs.or(user.client.timeout_secs),
        },
        server: ServerFileConfig {
            host: project.server.host.or(user.server.host),
            port: project.server.port.or(user.server.port),
            enable_cors: project.server.enable_cors.or(user.server.enable_cors),
        },
    }
}

fn resolve(file: FileConfig, overrides: &ClientOverrides) -> Config {
    let defaults = Config::default();
    let timeout_secs = overrides
        .timeout_secs
        .or(file.client.timeout_secs)
        .unwrap_or(DEFAULT_TIMEOUT_SECS);
    Config {
        client: ClientConfig {
            api_url: overrides
                .api_url
                .clone()
                .or(file.client.api_url)
                .unwrap_or(defaults.client.api_url),
            timeout: Duration::from_secs(timeout_secs),
        },
        server: ServerSettings {
            host: file.server.host.unwrap_or(defaults.server.host),
            port: file.server.port.unwrap_or(defaults.server.port),
            enable_cors: file.server.enable_cors.unwrap_or(defaults.server.enable_cors),
        },
    }
}

fn normalize_api_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

fn validate_config(config: &Config) -> Result<()> {
    let url = &config.client.api_url;
    if url.is_empty() {
        return Err(anyhow!(EchoBridgeError::Config(
            "api_url must not be empty.".to_string()
        )));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(anyhow!(EchoBridgeError::Config(format!(
            "Invalid api_url '{}'. Expected an http:// or https:// URL.",
            url
        ))));
    }
    if config.client.timeout.is_zero() {
        return Err(anyhow!(EchoBridgeError::Config(
            "timeout_secs must be greater than 0.".to_string()
        )));
    }
    Ok(())
}
