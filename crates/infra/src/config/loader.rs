//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Probe the standard locations for a config file (JSON or TOML)
//! 2. Start from that file, or from defaults when none exists
//! 3. Apply environment variable overrides
//! 4. Validate the result
//!
//! ## Environment Variables
//! - `PATHWISE_API_BASE_URL`: REST API base URL
//! - `PATHWISE_API_TIMEOUT`: request timeout in seconds
//! - `PATHWISE_API_MAX_ATTEMPTS`: attempts per request (1 = no retry)
//! - `PATHWISE_AUTH_SCHEME`: `Authorization` header scheme
//! - `PATHWISE_SESSION_BACKEND`: `keychain`, `file` or `memory`
//! - `PATHWISE_SESSION_FILE`: credential file for the `file` backend
//! - `PATHWISE_LOG_LEVEL`: default log filter
//! - `PATHWISE_LOG_JSON`: JSON log output (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.{json,toml}` then `./pathwise.{json,toml}`
//! 2. The same names in the parent and grandparent directories
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};

use pathwise_domain::{Config, PathwiseError, Result, SessionBackend};
use url::Url;

const FILE_NAMES: [&str; 4] = ["config.json", "config.toml", "pathwise.json", "pathwise.toml"];

/// Load configuration: file (if any) + environment overrides.
///
/// # Errors
/// Returns `PathwiseError::Config` if a probed file cannot be parsed, an
/// environment value is malformed or validation fails.
pub fn load() -> Result<Config> {
    let mut config = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };
    apply_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate(&config)?;
    Ok(config)
}

/// Defaults with environment overrides applied; no file is read.
///
/// # Errors
/// Returns `PathwiseError::Config` for malformed values.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    apply_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate(&config)?;
    Ok(config)
}

/// Apply every `PATHWISE_*` override that `lookup` returns a value for.
///
/// # Errors
/// Returns `PathwiseError::Config` for values that do not parse.
pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("PATHWISE_API_BASE_URL") {
        config.api.base_url = url;
    }
    if let Some(timeout) = lookup("PATHWISE_API_TIMEOUT") {
        config.api.timeout_seconds = Some(parse_number(&timeout, "PATHWISE_API_TIMEOUT")?);
    }
    if let Some(attempts) = lookup("PATHWISE_API_MAX_ATTEMPTS") {
        config.api.max_attempts = parse_number(&attempts, "PATHWISE_API_MAX_ATTEMPTS")?;
    }
    if let Some(scheme) = lookup("PATHWISE_AUTH_SCHEME") {
        config.api.auth_scheme = scheme;
    }
    if let Some(backend) = lookup("PATHWISE_SESSION_BACKEND") {
        config.session.backend = backend
            .parse::<SessionBackend>()
            .map_err(|e| PathwiseError::Config(format!("PATHWISE_SESSION_BACKEND: {e}")))?;
    }
    if let Some(path) = lookup("PATHWISE_SESSION_FILE") {
        config.session.file_path = Some(path);
    }
    if let Some(level) = lookup("PATHWISE_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = lookup("PATHWISE_LOG_JSON") {
        config.logging.json = parse_bool(&json);
    }
    Ok(())
}

/// Check cross-field constraints the types cannot express.
///
/// # Errors
/// Returns `PathwiseError::Config` describing the first problem found.
pub fn validate(config: &Config) -> Result<()> {
    let url = Url::parse(&config.api.base_url).map_err(|e| {
        PathwiseError::Config(format!("Invalid api.base_url '{}': {e}", config.api.base_url))
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(PathwiseError::Config(format!(
            "api.base_url must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if config.api.auth_scheme.trim().is_empty() {
        return Err(PathwiseError::Config("api.auth_scheme must not be empty".into()));
    }
    if config.api.max_attempts == 0 {
        return Err(PathwiseError::Config("api.max_attempts must be at least 1".into()));
    }
    if config.session.backend == SessionBackend::File
        && config.session.file_path.as_deref().map_or(true, str::is_empty)
    {
        return Err(PathwiseError::Config(
            "session.file_path is required when session.backend is 'file'".into(),
        ));
    }
    Ok(())
}

/// Load configuration from a file
///
/// If `path` is `None`, probes the standard locations.
///
/// # Errors
/// Returns `PathwiseError::Config` if the file is missing, unreadable or
/// malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(PathwiseError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            PathwiseError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| PathwiseError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| PathwiseError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| PathwiseError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(PathwiseError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// First existing config file among the standard locations.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            dirs.push(exe_dir.to_path_buf());
        }
    }

    dirs.iter()
        .flat_map(|dir| FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.is_file())
}

fn parse_number<T: std::str::FromStr>(value: &str, key: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| PathwiseError::Config(format!("Invalid {key} '{value}': {e}")))
}

/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn parse_bool(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
