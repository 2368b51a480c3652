//! JSON-file credential store
//!
//! Stores `{"token": "..."}` at a configured path. Writes go to a sibling
//! temp file first and are renamed into place.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use pathwise_common::{Credential, CredentialStore};
use pathwise_domain::PathwiseError;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::InfraError;

#[derive(Serialize, Deserialize)]
struct StoredSession {
    token: Credential,
}

#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Option<Credential>, PathwiseError> {
        let contents = match tokio::fs::read(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(InfraError::from(e).into()),
        };
        let stored: StoredSession =
            serde_json::from_slice(&contents).map_err(|e| PathwiseError::from(InfraError::from(e)))?;
        Ok(Some(stored.token).filter(|token| !token.is_empty()))
    }

    async fn write(&self, credential: &Credential) -> Result<(), PathwiseError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(InfraError::from)?;
        }
        let body = serde_json::to_vec(&StoredSession { token: credential.clone() })
            .map_err(InfraError::from)?;
        let temp = self.path.with_extension("tmp");
        tokio::fs::write(&temp, body).await.map_err(InfraError::from)?;
        tokio::fs::rename(&temp, &self.path).await.map_err(InfraError::from)?;
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<Credential>, String> {
        self.read().await.map_err(|e| e.to_string())
    }

    async fn save(&self, credential: &Credential) -> Result<(), String> {
        self.write(credential).await.map_err(|e| e.to_string())?;
        debug!(path = %self.path.display(), "Credential written");
        Ok(())
    }

    async fn clear(&self) -> Result<(), String> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PathwiseError::from(InfraError::from(e)).to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn missing_file_is_no_credential() {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(dir.path().join("session.json"));
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_load_clear() {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested").join("session.json"));

        store.save(&Credential::new("abc123")).await.unwrap();
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, r#"{"token":"abc123"}"#);
        assert_eq!(store.load().await.unwrap(), Some(Credential::new("abc123")));

        store.clear().await.unwrap();
        assert!(!store.path().exists());
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FileCredentialStore::new(path);
        assert!(store.load().await.is_err());
    }
}
