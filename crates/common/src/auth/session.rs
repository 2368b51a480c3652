//! Session store
//!
//! Owns the live credential for the process:
//! - Hydration from durable storage with a single validation round-trip
//! - Login and registration (credential persisted, then validated)
//! - Logout and forced logout after an authentication rejection
//! - Change notification through a `tokio::sync::watch` channel

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::traits::{AuthClientTrait, CredentialStore};
use super::types::{AuthError, Credential, SessionState};

/// Shared session state for every view and request
///
/// Cheap to share behind an `Arc`; all mutation goes through the watch
/// sender so subscribers see every transition.
pub struct SessionStore {
    client: Arc<dyn AuthClientTrait>,
    store: Arc<dyn CredentialStore>,
    state: watch::Sender<SessionState>,
}

impl SessionStore {
    /// Create a store in the `Loading` state
    ///
    /// Call [`SessionStore::hydrate`] once at startup to resolve it.
    pub fn new(client: Arc<dyn AuthClientTrait>, store: Arc<dyn CredentialStore>) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        Self { client, store, state }
    }

    /// Resolve the initial state from durable storage
    ///
    /// A stored credential is validated exactly once. A rejected credential
    /// is cleared; a credential that could not be checked because the
    /// server was unreachable is kept.
    pub async fn hydrate(&self) -> SessionState {
        self.publish(SessionState::Loading);

        let stored = match self.store.load().await {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Failed to read stored credential");
                None
            }
        };

        let Some(credential) = stored.filter(|c| !c.is_empty()) else {
            debug!("No stored credential, session is anonymous");
            return self.publish(SessionState::Anonymous);
        };

        match self.client.validate(&credential).await {
            Ok(()) => {
                info!("Stored credential accepted");
                self.publish(SessionState::Authenticated(credential))
            }
            Err(AuthError::Rejected(_)) => {
                info!("Stored credential rejected, clearing session");
                self.clear_storage().await;
                self.publish(SessionState::Anonymous)
            }
            Err(e) => {
                warn!(error = %e, "Could not validate stored credential, keeping it");
                self.publish(SessionState::Authenticated(credential))
            }
        }
    }

    /// Log in with username and password
    ///
    /// # Errors
    /// Returns the server's rejection or field error. When the identity
    /// check after a fresh login fails, the session is cleared and that
    /// failure is returned.
    pub async fn login(&self, username: &str, password: &str) -> Result<Credential, AuthError> {
        debug!(username = %username, "Logging in");
        let credential = self.client.obtain_token(username, password).await?;
        self.establish(credential).await
    }

    /// Register a new account and log in with the issued credential
    ///
    /// # Errors
    /// Same as [`SessionStore::login`].
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Credential, AuthError> {
        debug!(username = %username, "Registering");
        let credential = self.client.register(username, email, password).await?;
        self.establish(credential).await
    }

    /// Forget the credential in memory and in durable storage
    ///
    /// In-flight requests are not cancelled.
    pub async fn logout(&self) {
        self.clear_storage().await;
        self.publish(SessionState::Anonymous);
        info!("Logged out");
    }

    /// React to a 401/403 from any protected request
    ///
    /// Clears the session so guarded views redirect to login.
    pub async fn handle_rejection(&self) {
        if self.is_authenticated() {
            warn!("Credential rejected by server, ending session");
        }
        self.logout().await;
    }

    /// Current credential, if authenticated
    #[must_use]
    pub fn credential(&self) -> Option<Credential> {
        self.state.borrow().credential().cloned()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Receiver that observes every session transition
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    async fn establish(&self, credential: Credential) -> Result<Credential, AuthError> {
        if let Err(e) = self.store.save(&credential).await {
            warn!(error = %e, "Failed to persist credential, session will not survive restart");
        }
        self.publish(SessionState::Loading);

        match self.client.validate(&credential).await {
            Ok(()) => {
                self.publish(SessionState::Authenticated(credential.clone()));
                info!("Session established");
                Ok(credential)
            }
            Err(e) => {
                warn!(error = %e, "Identity check after login failed, clearing session");
                self.clear_storage().await;
                self.publish(SessionState::Anonymous);
                Err(e)
            }
        }
    }

    async fn clear_storage(&self) {
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Failed to clear stored credential");
        }
    }

    fn publish(&self, next: SessionState) -> SessionState {
        self.state.send_replace(next.clone());
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryCredentialStore;
    use crate::testing::MockAuthClient;

    fn session_with(
        client: MockAuthClient,
        store: MemoryCredentialStore,
    ) -> (SessionStore, Arc<MockAuthClient>, Arc<MemoryCredentialStore>) {
        let client = Arc::new(client);
        let store = Arc::new(store);
        (SessionStore::new(client.clone(), store.clone()), client, store)
    }

    #[tokio::test]
    async fn starts_loading_until_hydrated() {
        let (session, _, _) = session_with(MockAuthClient::new(), MemoryCredentialStore::new());
        assert!(session.state().is_loading());

        assert_eq!(session.hydrate().await, SessionState::Anonymous);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn hydrate_accepts_valid_stored_credential() {
        let (session, client, _) = session_with(
            MockAuthClient::new(),
            MemoryCredentialStore::with_credential(Credential::new("stored")),
        );

        let state = session.hydrate().await;

        assert!(state.is_authenticated());
        assert_eq!(session.credential(), Some(Credential::new("stored")));
        assert_eq!(client.validate_calls(), 1);
    }

    #[tokio::test]
    async fn hydrate_clears_rejected_credential_without_retry() {
        let client = MockAuthClient::new();
        client.fail_validation(AuthError::Rejected("Invalid token.".into()));
        let (session, client, store) =
            session_with(client, MemoryCredentialStore::with_credential(Credential::new("old")));

        assert_eq!(session.hydrate().await, SessionState::Anonymous);
        assert_eq!(store.current(), None);
        assert_eq!(client.validate_calls(), 1);
    }

    #[tokio::test]
    async fn hydrate_keeps_credential_when_server_unreachable() {
        let client = MockAuthClient::new();
        client.fail_validation(AuthError::Unavailable("down".into()));
        let (session, _, store) =
            session_with(client, MemoryCredentialStore::with_credential(Credential::new("kept")));

        assert!(session.hydrate().await.is_authenticated());
        assert_eq!(store.current(), Some(Credential::new("kept")));
    }

    #[tokio::test]
    async fn login_persists_server_issued_token() {
        let client = MockAuthClient::new();
        client.issue_token("server-token");
        let (session, _, store) = session_with(client, MemoryCredentialStore::new());

        let credential = session.login("ada", "pw").await.unwrap();

        assert_eq!(credential.expose(), "server-token");
        assert_eq!(store.current(), Some(Credential::new("server-token")));
        assert!(session.is_authenticated());
    }

    struct ReadOnlyStore;

    #[async_trait::async_trait]
    impl CredentialStore for ReadOnlyStore {
        async fn load(&self) -> Result<Option<Credential>, String> {
            Ok(None)
        }

        async fn save(&self, _credential: &Credential) -> Result<(), String> {
            Err("read-only volume".into())
        }

        async fn clear(&self) -> Result<(), String> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn login_survives_a_credential_that_cannot_be_saved() {
        let session = SessionStore::new(Arc::new(MockAuthClient::new()), Arc::new(ReadOnlyStore));

        let credential = session.login("ada", "pw").await.unwrap();

        assert_eq!(session.credential(), Some(credential));
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn login_rejection_leaves_session_anonymous() {
        let client = MockAuthClient::new();
        client.fail_login(AuthError::Rejected(
            "Unable to log in with provided credentials.".into(),
        ));
        let (session, _, store) = session_with(client, MemoryCredentialStore::new());
        session.hydrate().await;

        let err = session.login("ada", "wrong").await.unwrap_err();

        assert!(err.is_rejection());
        assert_eq!(store.current(), None);
        assert_eq!(session.state(), SessionState::Anonymous);
    }

    #[tokio::test]
    async fn failed_identity_check_after_login_clears_session() {
        let client = MockAuthClient::new();
        client.fail_validation(AuthError::Unavailable("boom".into()));
        let (session, _, store) = session_with(client, MemoryCredentialStore::new());

        let err = session.login("ada", "pw").await.unwrap_err();

        assert!(matches!(err, AuthError::Unavailable(_)));
        assert_eq!(store.current(), None);
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn logout_clears_memory_and_storage() {
        let (session, _, store) = session_with(MockAuthClient::new(), MemoryCredentialStore::new());
        session.register("ada", "ada@example.com", "pw").await.unwrap();
        assert!(store.current().is_some());

        session.logout().await;

        assert_eq!(session.credential(), None);
        assert_eq!(store.current(), None);
    }

    #[tokio::test]
    async fn subscribers_observe_transitions() {
        let (session, _, _) = session_with(MockAuthClient::new(), MemoryCredentialStore::new());
        let mut rx = session.subscribe();

        session.login("ada", "pw").await.unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_authenticated());

        session.handle_rejection().await;
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), SessionState::Anonymous);
    }
}
