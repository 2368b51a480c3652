//! Mock implementations of the auth and keychain traits

#[cfg(feature = "platform")]
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
#[cfg(feature = "platform")]
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::auth::{AuthClientTrait, AuthError, Credential};
#[cfg(feature = "platform")]
use crate::auth::CredentialStore;
#[cfg(feature = "platform")]
use crate::security::KeychainError;

/// Mock auth client that issues tokens without network calls.
///
/// Every call succeeds until a failure is scripted with one of the `fail_*`
/// methods.
#[derive(Debug)]
pub struct MockAuthClient {
    token: Mutex<String>,
    login_error: Mutex<Option<AuthError>>,
    register_error: Mutex<Option<AuthError>>,
    validation_error: Mutex<Option<AuthError>>,
    validate_calls: AtomicUsize,
    last_username: Mutex<Option<String>>,
}

impl MockAuthClient {
    pub fn new() -> Self {
        Self {
            token: Mutex::new("mock-token".to_string()),
            login_error: Mutex::new(None),
            register_error: Mutex::new(None),
            validation_error: Mutex::new(None),
            validate_calls: AtomicUsize::new(0),
            last_username: Mutex::new(None),
        }
    }

    /// Token returned by the next successful login or registration.
    pub fn issue_token(&self, token: &str) {
        *self.token.lock() = token.to_string();
    }

    pub fn fail_login(&self, error: AuthError) {
        *self.login_error.lock() = Some(error);
    }

    pub fn fail_register(&self, error: AuthError) {
        *self.register_error.lock() = Some(error);
    }

    pub fn fail_validation(&self, error: AuthError) {
        *self.validation_error.lock() = Some(error);
    }

    #[must_use]
    pub fn validate_calls(&self) -> usize {
        self.validate_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn last_username(&self) -> Option<String> {
        self.last_username.lock().clone()
    }

    fn issue(&self, username: &str, error: &Mutex<Option<AuthError>>) -> Result<Credential, AuthError> {
        *self.last_username.lock() = Some(username.to_string());
        match error.lock().clone() {
            Some(err) => Err(err),
            None => Ok(Credential::new(self.token.lock().clone())),
        }
    }
}

impl Default for MockAuthClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthClientTrait for MockAuthClient {
    async fn obtain_token(&self, username: &str, _password: &str) -> Result<Credential, AuthError> {
        self.issue(username, &self.login_error)
    }

    async fn register(
        &self,
        username: &str,
        _email: &str,
        _password: &str,
    ) -> Result<Credential, AuthError> {
        self.issue(username, &self.register_error)
    }

    async fn validate(&self, _credential: &Credential) -> Result<(), AuthError> {
        self.validate_calls.fetch_add(1, Ordering::SeqCst);
        match self.validation_error.lock().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(feature = "platform")]
type StorageData = Arc<Mutex<HashMap<String, String>>>;

/// Mock keychain that stores secrets in memory.
///
/// Mirrors `KeychainProvider`'s API and also implements `CredentialStore`
/// under a fixed key, so it can stand in for the keychain-backed session
/// store.
#[derive(Clone, Debug)]
#[cfg(feature = "platform")]
pub struct MockKeychainProvider {
    storage: StorageData,
    service_name: String,
    credential_key: String,
    should_fail: Arc<Mutex<bool>>,
}

#[cfg(feature = "platform")]
impl MockKeychainProvider {
    /// Create a new mock keychain provider with a service name for namespacing.
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            storage: Arc::new(Mutex::new(HashMap::new())),
            service_name: service_name.into(),
            credential_key: "token".to_string(),
            should_fail: Arc::new(Mutex::new(false)),
        }
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Make every subsequent operation fail as if the keychain were locked.
    pub fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.lock() = should_fail;
    }

    pub fn store(&self, key: &str, value: &str) -> Result<(), KeychainError> {
        self.check_access("store", key)?;
        self.storage.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    pub fn fetch(&self, key: &str) -> Result<Option<String>, KeychainError> {
        self.check_access("fetch", key)?;
        Ok(self.storage.lock().get(key).cloned())
    }

    pub fn remove(&self, key: &str) -> Result<(), KeychainError> {
        self.check_access("remove", key)?;
        self.storage.lock().remove(key);
        Ok(())
    }

    /// Whether `key` is present, bypassing the failure switch.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.storage.lock().contains_key(key)
    }

    fn check_access(&self, operation: &'static str, key: &str) -> Result<(), KeychainError> {
        if *self.should_fail.lock() {
            return Err(KeychainError::new(operation, key, "mock keychain locked"));
        }
        Ok(())
    }
}

#[cfg(feature = "platform")]
impl Default for MockKeychainProvider {
    fn default() -> Self {
        Self::new("pathwise-test")
    }
}

#[cfg(feature = "platform")]
#[async_trait]
impl CredentialStore for MockKeychainProvider {
    async fn load(&self) -> Result<Option<Credential>, String> {
        let token = self.fetch(&self.credential_key).map_err(|e| e.to_string())?;
        Ok(token.map(Credential::new))
    }

    async fn save(&self, credential: &Credential) -> Result<(), String> {
        self.store(&self.credential_key, credential.expose()).map_err(|e| e.to_string())
    }

    async fn clear(&self) -> Result<(), String> {
        self.remove(&self.credential_key).map_err(|e| e.to_string())
    }
}
