//! Platform keychain access
//!
//! Secrets are grouped under one service name and addressed by key. The
//! backend is whatever `keyring` selects for the platform: Keychain Access
//! on macOS, Credential Manager on Windows and Secret Service on Linux.
//!
//! ```no_run
//! use pathwise_common::security::keychain::KeychainProvider;
//!
//! let keychain = KeychainProvider::new("Pathwise.session");
//! keychain.store("token", "0123abcd")?;
//! assert_eq!(keychain.fetch("token")?.as_deref(), Some("0123abcd"));
//! keychain.remove("token")?;
//! # Ok::<(), pathwise_common::security::KeychainError>(())
//! ```

use keyring::Entry;
use thiserror::Error;
use tracing::debug;

/// A keychain operation that could not be completed
///
/// A missing entry is not an error: `fetch` returns `None` and `remove`
/// succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("keychain {operation} of '{key}' failed: {message}")]
pub struct KeychainError {
    pub operation: &'static str,
    pub key: String,
    pub message: String,
}

impl KeychainError {
    pub fn new(operation: &'static str, key: &str, message: impl Into<String>) -> Self {
        Self { operation, key: key.to_string(), message: message.into() }
    }
}

/// Keychain entries under one service name
#[derive(Debug, Clone)]
pub struct KeychainProvider {
    service_name: String,
}

impl KeychainProvider {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into() }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Create or overwrite the entry for `key`.
    ///
    /// # Errors
    /// Fails when the keychain is locked or unavailable.
    pub fn store(&self, key: &str, value: &str) -> Result<(), KeychainError> {
        debug!(service = %self.service_name, key, "Keychain store");
        self.entry("store", key)?
            .set_password(value)
            .map_err(|e| KeychainError::new("store", key, e.to_string()))
    }

    /// Read the entry for `key`, `None` when there is none.
    ///
    /// # Errors
    /// Fails when the keychain is locked or unavailable.
    pub fn fetch(&self, key: &str) -> Result<Option<String>, KeychainError> {
        debug!(service = %self.service_name, key, "Keychain fetch");
        match self.entry("fetch", key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(KeychainError::new("fetch", key, e.to_string())),
        }
    }

    /// Delete the entry for `key`; deleting a missing entry succeeds.
    ///
    /// # Errors
    /// Fails when the keychain is locked or unavailable.
    pub fn remove(&self, key: &str) -> Result<(), KeychainError> {
        debug!(service = %self.service_name, key, "Keychain remove");
        match self.entry("remove", key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(KeychainError::new("remove", key, e.to_string())),
        }
    }

    fn entry(&self, operation: &'static str, key: &str) -> Result<Entry, KeychainError> {
        Entry::new(&self.service_name, key)
            .map_err(|e| KeychainError::new(operation, key, e.to_string()))
    }
}
