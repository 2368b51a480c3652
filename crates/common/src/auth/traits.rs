//! Traits for authentication and credential storage
//!
//! These traits enable dependency injection and testing by abstracting
//! external dependencies (the REST API, the system keychain).

use async_trait::async_trait;

use super::types::{AuthError, Credential};

/// Trait for the server side of authentication
///
/// Implemented by the HTTP API client; mocked in tests.
#[async_trait]
pub trait AuthClientTrait: Send + Sync {
    /// Exchange username and password for a credential
    ///
    /// # Errors
    /// Returns `AuthError::Rejected` for bad credentials and
    /// `AuthError::Invalid` when the server reports field errors.
    async fn obtain_token(&self, username: &str, password: &str) -> Result<Credential, AuthError>;

    /// Create an account and return its credential
    ///
    /// # Errors
    /// Returns `AuthError::Invalid` with the server's first field error when
    /// registration is refused.
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Credential, AuthError>;

    /// Check that `credential` still identifies a user
    ///
    /// # Errors
    /// Returns `AuthError::Rejected` when the server no longer accepts it.
    async fn validate(&self, credential: &Credential) -> Result<(), AuthError>;
}

/// Trait for durable credential storage
///
/// A store holds at most one credential under a single fixed key.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the stored credential, if any
    ///
    /// # Errors
    /// Returns error if the backend cannot be read
    async fn load(&self) -> Result<Option<Credential>, String>;

    /// Persist `credential`, replacing any previous one
    ///
    /// # Errors
    /// Returns error if storage fails
    async fn save(&self, credential: &Credential) -> Result<(), String>;

    /// Remove the stored credential (idempotent)
    ///
    /// # Errors
    /// Returns error if the backend cannot be written
    async fn clear(&self) -> Result<(), String>;
}
