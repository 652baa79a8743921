//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Loads a `.env` file from the working directory if present
//! 2. Starts from the first config file found by [`probe_config_paths`], or
//!    from [`ClientConfig::default`] when there is none
//! 3. Overrides individual fields from environment variables
//! 4. Validates the base URL
//!
//! ## Environment Variables
//! - `POCKETLEDGER_API_BASE_URL`: API base URL (http or https)
//! - `POCKETLEDGER_APP_ID`: Value of the `X-App-Id` header
//! - `POCKETLEDGER_REQUEST_TIMEOUT_SECS`: Per-request timeout, `0` disables it
//! - `POCKETLEDGER_KEYCHAIN_SERVICE`: Keychain service name for credentials
//!
//! ## File Locations
//! Probed in order, in the working directory then next to the executable:
//! `pocketledger.json`, `pocketledger.toml`, `config.json`, `config.toml`.

use std::path::{Path, PathBuf};

use pocketledger_domain::{ClientConfig, LedgerError, Result};
use url::Url;

pub const ENV_BASE_URL: &str = "POCKETLEDGER_API_BASE_URL";
pub const ENV_APP_ID: &str = "POCKETLEDGER_APP_ID";
pub const ENV_REQUEST_TIMEOUT: &str = "POCKETLEDGER_REQUEST_TIMEOUT_SECS";
pub const ENV_KEYCHAIN_SERVICE: &str = "POCKETLEDGER_KEYCHAIN_SERVICE";

const CONFIG_FILE_NAMES: [&str; 4] =
    ["pocketledger.json", "pocketledger.toml", "config.json", "config.toml"];

/// Load configuration: file (or defaults), then environment overrides.
///
/// # Errors
/// Returns `LedgerError::Config` if a probed file is malformed, an
/// environment value is invalid, or the resulting base URL is not an
/// http(s) URL.
pub fn load() -> Result<ClientConfig> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    let base = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, using defaults");
            ClientConfig::default()
        }
    };

    let config = apply_env(base)?;
    tracing::info!(base_url = %config.base_url, "Client configuration loaded");
    Ok(config)
}

/// Load configuration from environment variables over the defaults.
///
/// # Errors
/// Returns `LedgerError::Config` if a variable has an invalid value.
pub fn load_from_env() -> Result<ClientConfig> {
    apply_env(ClientConfig::default())
}

/// Load configuration from a file.
///
/// If `path` is `None`, probes the standard locations. Missing fields take
/// their defaults. JSON and TOML are detected by extension.
///
/// # Errors
/// Returns `LedgerError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - The base URL is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(LedgerError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            LedgerError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| LedgerError::Config(format!("Failed to read config file: {e}")))?;

    let mut config = parse_config(&contents, &config_path)?;
    config.base_url = validate_base_url(&config.base_url)?;
    Ok(config)
}

fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| LedgerError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| LedgerError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(LedgerError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file in the standard locations.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();
    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd);
    }
    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf)) {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}

/// Check that `raw` is an absolute http(s) URL and drop trailing slashes.
///
/// # Errors
/// Returns `LedgerError::Config` otherwise.
pub fn validate_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed)
        .map_err(|e| LedgerError::Config(format!("Invalid base URL '{raw}': {e}")))?;

    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(LedgerError::Config(format!(
            "Invalid base URL '{raw}': unsupported scheme '{other}'"
        ))),
    }
}

fn apply_env(mut config: ClientConfig) -> Result<ClientConfig> {
    if let Some(base_url) = env_opt(ENV_BASE_URL) {
        config.base_url = base_url;
    }
    if let Some(app_id) = env_opt(ENV_APP_ID) {
        config.app_id = app_id;
    }
    if let Some(timeout) = env_opt(ENV_REQUEST_TIMEOUT) {
        let secs = timeout.parse::<u64>().map_err(|e| {
            LedgerError::Config(format!("Invalid {ENV_REQUEST_TIMEOUT} '{timeout}': {e}"))
        })?;
        config.request_timeout_secs = (secs > 0).then_some(secs);
    }
    if let Some(service) = env_opt(ENV_KEYCHAIN_SERVICE) {
        config.keychain_service = service;
    }

    config.base_url = validate_base_url(&config.base_url)?;
    Ok(config)
}

/// Environment variable, treating unset and blank the same.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
