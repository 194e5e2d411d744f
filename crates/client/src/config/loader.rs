//! Configuration loader
//!
//! Loads client configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If the token is missing, falls back to loading from file
//! 3. Searches multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `PLURALKIT_TOKEN`: API token (required)
//! - `PLURALKIT_BASE_URL`: API base URL
//! - `PLURALKIT_TIMEOUT_SECS`: Per-attempt timeout in seconds
//! - `PLURALKIT_USER_AGENT`: `User-Agent` header value
//! - `PLURALKIT_REQUESTS_PER_SECOND`: Client-side pacing (0 disables it)
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./pluralkit.json` or `./pluralkit.toml` (current working directory)
//! 2. `../pluralkit.json` or `../pluralkit.toml` (parent directory)
//! 3. `../../pluralkit.json` or `../../pluralkit.toml` (grandparent directory)
//! 4. The same names next to the executable

use std::path::{Path, PathBuf};

use pluralkit_domain::{ClientConfig, PkError, Result};

const ENV_TOKEN: &str = "PLURALKIT_TOKEN";
const ENV_BASE_URL: &str = "PLURALKIT_BASE_URL";
const ENV_TIMEOUT_SECS: &str = "PLURALKIT_TIMEOUT_SECS";
const ENV_USER_AGENT: &str = "PLURALKIT_USER_AGENT";
const ENV_REQUESTS_PER_SECOND: &str = "PLURALKIT_REQUESTS_PER_SECOND";

const CONFIG_FILE_NAMES: [&str; 2] = ["pluralkit.json", "pluralkit.toml"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If the token is
/// missing or a variable is invalid, falls back to loading from a config
/// file.
///
/// # Errors
/// Returns `PkError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
pub fn load() -> Result<ClientConfig> {
    match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            Ok(config)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            load_from_file(None)
        }
    }
}

/// Load configuration from environment variables
///
/// `PLURALKIT_TOKEN` must be present; every other variable falls back to the
/// default when unset.
///
/// # Errors
/// Returns `PkError::Config` if the token is missing or a variable has an
/// invalid value.
pub fn load_from_env() -> Result<ClientConfig> {
    let mut config = ClientConfig { token: Some(env_var(ENV_TOKEN)?), ..ClientConfig::default() };

    if let Some(base_url) = optional_env_var(ENV_BASE_URL) {
        config.base_url = base_url;
    }

    if let Some(timeout) = optional_env_var(ENV_TIMEOUT_SECS) {
        let seconds = timeout
            .parse::<u64>()
            .map_err(|e| PkError::Config(format!("Invalid timeout: {}", e)))?;
        config.timeout_ms = seconds.saturating_mul(1000);
    }

    if let Some(user_agent) = optional_env_var(ENV_USER_AGENT) {
        config.user_agent = user_agent;
    }

    if let Some(rate) = optional_env_var(ENV_REQUESTS_PER_SECOND) {
        let rate = rate
            .parse::<u32>()
            .map_err(|e| PkError::Config(format!("Invalid requests per second: {}", e)))?;
        config.requests_per_second = (rate > 0).then_some(rate);
    }

    Ok(config)
}

/// Load configuration from a file
///
/// If `path` is `None`, searches multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension). Missing
/// keys take their default values.
///
/// # Errors
/// Returns `PkError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<ClientConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PkError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => find_config_file().ok_or_else(|| {
            PkError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PkError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<ClientConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PkError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PkError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(PkError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Search multiple paths for configuration files
///
/// Searches the working directory and up to two parents, then the
/// executable's directory and up to two parents.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn find_config_file() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.push(cwd);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots.iter().flat_map(|root| candidates_under(root)).find(|path| path.exists())
}

fn candidates_under(root: &Path) -> Vec<PathBuf> {
    ["", "..", "../.."]
        .iter()
        .flat_map(|up| CONFIG_FILE_NAMES.iter().map(move |name| root.join(up).join(name)))
        .collect()
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    optional_env_var(key)
        .ok_or_else(|| PkError::Config(format!("Missing required environment variable: {}", key)))
}

/// Non-blank environment variable
fn optional_env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}
