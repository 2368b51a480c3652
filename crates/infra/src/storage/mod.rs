//! Credential storage backends
//!
//! [`build_credential_store`] picks the backend named in the session
//! configuration.

pub mod file;

use std::sync::Arc;

use pathwise_common::auth::KeychainCredentialStore;
use pathwise_common::{CredentialStore, KeychainProvider, MemoryCredentialStore};
use pathwise_domain::{PathwiseError, Result, SessionBackend, SessionConfig};
use tracing::info;

pub use file::FileCredentialStore;

/// # Errors
/// Returns `PathwiseError::Config` when the file backend has no path.
pub fn build_credential_store(config: &SessionConfig) -> Result<Arc<dyn CredentialStore>> {
    let store: Arc<dyn CredentialStore> = match config.backend {
        SessionBackend::Keychain => Arc::new(KeychainCredentialStore::new(
            KeychainProvider::new(config.service_name.clone()),
            config.storage_key.clone(),
        )),
        SessionBackend::File => {
            let path = config.file_path.as_deref().filter(|p| !p.is_empty()).ok_or_else(|| {
                PathwiseError::Config("session.file_path is required for the file backend".into())
            })?;
            Arc::new(FileCredentialStore::new(path))
        }
        SessionBackend::Memory => Arc::new(MemoryCredentialStore::new()),
    };
    info!(backend = %config.backend, "Credential store selected");
    Ok(store)
}
