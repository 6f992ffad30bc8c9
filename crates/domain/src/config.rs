//! Configuration structures
//!
//! Deserialized from environment variables or a config file by the infra
//! loader. The domain crate only defines the shapes.

use serde::{Deserialize, Serialize};

/// Top-level application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Hosted backend store settings
    pub store: StoreConfig,
    /// Hosted auth service settings
    pub auth: AuthConfig,
    /// Realtime change-feed settings
    #[serde(default)]
    pub realtime: RealtimeConfig,
    /// HTTP surface settings
    #[serde(default)]
    pub server: ServerConfig,
}

/// Hosted backend store (REST) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the store's REST endpoint
    pub base_url: String,
    /// Service key presented on every request
    pub service_key: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Total attempts per request (initial try + retries)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,
}

/// Hosted auth service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Base URL of the auth endpoint
    pub base_url: String,
    /// Publishable API key sent alongside credentials
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Realtime change-feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    /// Whether live subscriptions are opened at startup
    pub enabled: bool,
    /// Initial reconnect backoff in milliseconds (doubles per attempt)
    pub reconnect_backoff_ms: u64,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self { enabled: true, reconnect_backoff_ms: 500 }
    }
}

/// HTTP surface configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the API binds to
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_addr: "127.0.0.1:8787".to_string() }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_attempts() -> usize {
    3
}
