//! Credential storage layered on top of `KeychainProvider`.
//!
//! # Module Layering
//!
//! - **`security::keychain`**: generic secret storage via the platform
//!   keychain (macOS Keychain, Windows Credential Manager, Linux Secret
//!   Service)
//! - **`auth::keychain`** (this module): stores the session credential under
//!   one fixed key
//!
//! This keeps session-specific logic in the auth module while the security
//! module stays free of auth types.

use async_trait::async_trait;
use tracing::debug;

use crate::auth::traits::CredentialStore;
use crate::auth::types::Credential;
use crate::security::KeychainProvider;

/// Session credential persisted in the platform keychain
pub struct KeychainCredentialStore {
    provider: KeychainProvider,
    key: String,
}

impl KeychainCredentialStore {
    /// # Arguments
    /// * `provider` - Keychain scoped to the application's service name
    /// * `key` - Fixed entry name the credential lives under (e.g. "token")
    pub fn new(provider: KeychainProvider, key: impl Into<String>) -> Self {
        Self { provider, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

#[async_trait]
impl CredentialStore for KeychainCredentialStore {
    async fn load(&self) -> Result<Option<Credential>, String> {
        let token = self.provider.fetch(&self.key).map_err(|e| e.to_string())?;
        match token {
            Some(token) if !token.trim().is_empty() => Ok(Some(Credential::new(token))),
            _ => {
                debug!(key = %self.key, "No stored credential");
                Ok(None)
            }
        }
    }

    async fn save(&self, credential: &Credential) -> Result<(), String> {
        self.provider.store(&self.key, credential.expose()).map_err(|e| e.to_string())
    }

    async fn clear(&self) -> Result<(), String> {
        self.provider.remove(&self.key).map_err(|e| e.to_string())
    }
}
