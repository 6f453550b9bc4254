//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `OPSDECK_BACKEND_URL`: Base URL of the hosted backend (required)
//! - `OPSDECK_API_KEY`: Backend API key (required)
//! - `OPSDECK_BACKEND_TIMEOUT_SECS`: Per-request timeout in seconds
//! - `OPSDECK_MONITOR_TICK_SECS`: SLA monitor polling interval in seconds
//! - `OPSDECK_MONITOR_CLEAR_SECS`: Notification cooldown window in seconds
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./opsdeck.json` or `./opsdeck.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. Relative to executable location

use std::path::{Path, PathBuf};

use opsdeck_domain::constants::{MONITOR_TICK_SECS, NOTIFIED_CLEAR_SECS};
use opsdeck_domain::{OpsDeckError, Result};
use serde::{Deserialize, Serialize};

const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 15;

/// Backend connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// SLA monitor scheduling settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_tick_secs")]
    pub tick_secs: u64,
    #[serde(default = "default_clear_secs")]
    pub clear_secs: u64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self { tick_secs: MONITOR_TICK_SECS, clear_secs: NOTIFIED_CLEAR_SECS }
    }
}

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend: BackendConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_BACKEND_TIMEOUT_SECS
}

fn default_tick_secs() -> u64 {
    MONITOR_TICK_SECS
}

fn default_clear_secs() -> u64 {
    NOTIFIED_CLEAR_SECS
}

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `OpsDeckError::Config` if configuration cannot be loaded from
/// either source.
pub fn load() -> Result<AppConfig> {
    // Pick up a local .env for development setups.
    dotenvy::dotenv().ok();

    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `OpsDeckError::Config` if required variables are missing or have
/// invalid values.
pub fn load_from_env() -> Result<AppConfig> {
    let base_url = env_var("OPSDECK_BACKEND_URL")?;
    let api_key = env_var("OPSDECK_API_KEY")?;
    let timeout_secs =
        env_u64("OPSDECK_BACKEND_TIMEOUT_SECS", DEFAULT_BACKEND_TIMEOUT_SECS)?;
    let tick_secs = env_u64("OPSDECK_MONITOR_TICK_SECS", MONITOR_TICK_SECS)?;
    let clear_secs = env_u64("OPSDECK_MONITOR_CLEAR_SECS", NOTIFIED_CLEAR_SECS)?;

    Ok(AppConfig {
        backend: BackendConfig { base_url, api_key, timeout_secs },
        monitor: MonitorConfig { tick_secs, clear_secs },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `OpsDeckError::Config` if no file is found or parsing fails.
pub fn load_from_file(path: Option<PathBuf>) -> Result<AppConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(OpsDeckError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            OpsDeckError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| OpsDeckError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content; format is detected by file
/// extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<AppConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| OpsDeckError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| OpsDeckError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(OpsDeckError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files, returning the first that
/// exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(vec![
            cwd.join("config.json"),
            cwd.join("config.toml"),
            cwd.join("opsdeck.json"),
            cwd.join("opsdeck.toml"),
            cwd.join("../config.json"),
            cwd.join("../config.toml"),
        ]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(vec![
                exe_dir.join("config.json"),
                exe_dir.join("config.toml"),
                exe_dir.join("opsdeck.json"),
                exe_dir.join("opsdeck.toml"),
            ]);
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| OpsDeckError::Config(format!("Missing required environment variable: {key}")))
}

/// Parse an optional numeric environment variable
fn env_u64(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .map_err(|e| OpsDeckError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}
