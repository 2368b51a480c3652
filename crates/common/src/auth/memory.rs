//! Process-local credential storage
//!
//! Used for the `memory` session backend and in tests. Nothing survives a
//! restart.

use async_trait::async_trait;
use parking_lot::RwLock;

use super::traits::CredentialStore;
use super::types::Credential;

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: RwLock<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `credential`, as if left by an earlier run.
    pub fn with_credential(credential: Credential) -> Self {
        Self { slot: RwLock::new(Some(credential)) }
    }

    pub fn current(&self) -> Option<Credential> {
        self.slot.read().clone()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<Credential>, String> {
        Ok(self.current())
    }

    async fn save(&self, credential: &Credential) -> Result<(), String> {
        *self.slot.write() = Some(credential.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), String> {
        self.slot.write().take();
        Ok(())
    }
}
