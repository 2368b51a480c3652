//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    CREDENTIAL_STORAGE_KEY, DEFAULT_API_BASE_URL, DEFAULT_AUTH_SCHEME, DEFAULT_KEYCHAIN_SERVICE,
};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}

/// REST API connection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint path is joined onto.
    pub base_url: String,
    /// Request timeout. `None` keeps the transport default.
    pub timeout_seconds: Option<u64>,
    /// Scheme placed before the credential in the `Authorization` header.
    pub auth_scheme: String,
    /// Attempts per request. `1` disables retries.
    pub max_attempts: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: None,
            auth_scheme: DEFAULT_AUTH_SCHEME.to_string(),
            max_attempts: 1,
        }
    }
}

/// Where the session credential is persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionBackend {
    /// Platform keychain via the `keyring` crate.
    #[default]
    Keychain,
    /// Plain JSON file at `SessionConfig::file_path`.
    File,
    /// Process memory only; nothing survives a restart.
    Memory,
}

crate::impl_wire_name_conversions!(SessionBackend {
    Keychain => "keychain",
    File => "file",
    Memory => "memory",
});

/// Durable session storage settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub backend: SessionBackend,
    /// Keychain service name.
    pub service_name: String,
    /// Fixed key the credential is stored under.
    pub storage_key: String,
    /// Required when `backend` is `file`.
    pub file_path: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            backend: SessionBackend::default(),
            service_name: DEFAULT_KEYCHAIN_SERVICE.to_string(),
            storage_key: CREDENTIAL_STORAGE_KEY.to_string(),
            file_path: None,
        }
    }
}

/// Logging output settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), json: false }
    }
}
