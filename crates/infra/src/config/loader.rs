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
//! - `FRONTDESK_STORE_URL`: Hosted store REST endpoint
//! - `FRONTDESK_STORE_SERVICE_KEY`: Store service key
//! - `FRONTDESK_STORE_TIMEOUT_SECS`: Store request timeout (optional)
//! - `FRONTDESK_STORE_MAX_ATTEMPTS`: Store request attempts (optional)
//! - `FRONTDESK_AUTH_URL`: Hosted auth endpoint
//! - `FRONTDESK_AUTH_API_KEY`: Auth publishable key
//! - `FRONTDESK_REALTIME_ENABLED`: Whether live subscriptions open (optional)
//! - `FRONTDESK_BIND_ADDR`: API bind address (optional)

use std::path::{Path, PathBuf};

use frontdesk_domain::{
    AuthConfig, Config, FrontdeskError, RealtimeConfig, Result, ServerConfig, StoreConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `FrontdeskError::Config` if configuration cannot be loaded from
/// either source.
pub fn load() -> Result<Config> {
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
/// Returns `FrontdeskError::Config` if required variables are missing or
/// have invalid values.
pub fn load_from_env() -> Result<Config> {
    let store_url = env_var("FRONTDESK_STORE_URL")?;
    let service_key = env_var("FRONTDESK_STORE_SERVICE_KEY")?;
    let auth_url = env_var("FRONTDESK_AUTH_URL")?;
    let auth_key = env_var("FRONTDESK_AUTH_API_KEY")?;

    let timeout_secs = env_parse("FRONTDESK_STORE_TIMEOUT_SECS", 30)?;
    let max_attempts = env_parse("FRONTDESK_STORE_MAX_ATTEMPTS", 3)?;
    let reconnect_backoff_ms = env_parse("FRONTDESK_REALTIME_BACKOFF_MS", 500)?;

    Ok(Config {
        store: StoreConfig {
            base_url: store_url,
            service_key,
            timeout_secs,
            max_attempts,
        },
        auth: AuthConfig { base_url: auth_url, api_key: auth_key, timeout_secs },
        realtime: RealtimeConfig {
            enabled: env_bool("FRONTDESK_REALTIME_ENABLED", true),
            reconnect_backoff_ms,
        },
        server: ServerConfig {
            bind_addr: std::env::var("FRONTDESK_BIND_ADDR")
                .unwrap_or_else(|_| ServerConfig::default().bind_addr),
        },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `FrontdeskError::Config` if the file is missing or malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(FrontdeskError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            FrontdeskError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| FrontdeskError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content; the format is detected by file
/// extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| FrontdeskError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| FrontdeskError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(FrontdeskError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// Searches the working directory, its parents (two levels), and the
/// executable's directory for `config.{json,toml}` and
/// `frontdesk.{json,toml}`.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        for dir in [cwd.clone(), cwd.join(".."), cwd.join("../..")] {
            for name in ["config.json", "config.toml", "frontdesk.json", "frontdesk.toml"] {
                candidates.push(dir.join(name));
            }
        }
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            for name in ["config.json", "config.toml", "frontdesk.json", "frontdesk.toml"] {
                candidates.push(exe_dir.join(name));
            }
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

/// Get required environment variable
fn env_var(key: &str) -> Result<String> {
    std::env::var(key).map_err(|_| {
        FrontdeskError::Config(format!("Missing required environment variable: {key}"))
    })
}

/// Parse a numeric environment variable with a default when unset.
fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| FrontdeskError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
