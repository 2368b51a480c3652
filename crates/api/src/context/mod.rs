//! Application context - dependency injection container

use std::sync::Arc;

use pathwise_common::auth::{CredentialStore, SessionStore};
use pathwise_core::{DashboardService, LearningService, LearningSession, OnboardingFlow, QuizFlow};
use pathwise_domain::{Config, Result};
use pathwise_infra::{build_credential_store, ApiAuthClient, ApiClient, ApiGateway};
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Quiz in progress for one challenge route
#[derive(Debug, Clone)]
pub struct ActiveChallenge {
    pub track_id: String,
    pub day: u32,
    pub flow: QuizFlow,
}

/// Application context - holds all services and per-view state
///
/// One context serves one user session. Flow state is reset whenever the
/// user logs in or out.
pub struct AppContext {
    pub config: Config,
    pub session: Arc<SessionStore>,
    pub gateway: Arc<ApiGateway>,
    pub dashboard: DashboardService,
    pub learning: LearningService,
    pub onboarding: Mutex<OnboardingFlow>,
    pub challenge: Mutex<Option<ActiveChallenge>>,
    pub learning_page: Mutex<Option<LearningSession>>,
}

impl AppContext {
    /// Build the context with the credential store named by the config.
    ///
    /// # Errors
    /// Returns `Config` when the base URL or storage backend is unusable.
    pub fn new(config: Config) -> Result<Self> {
        let store = build_credential_store(&config.session)?;
        Self::with_credential_store(config, store)
    }

    /// Build the context around an explicit credential store.
    ///
    /// # Errors
    /// Returns `Config` when the base URL is unusable.
    pub fn with_credential_store(config: Config, store: Arc<dyn CredentialStore>) -> Result<Self> {
        let anonymous = ApiClient::new(&config.api)?;
        let auth = Arc::new(ApiAuthClient::new(anonymous.clone()));
        let session = Arc::new(SessionStore::new(auth, store));

        let authenticated = anonymous.with_credentials(session.clone());
        let gateway = Arc::new(ApiGateway::new(authenticated));

        info!(
            base_url = %gateway.base_url(),
            backend = %config.session.backend,
            "Application context initialized"
        );

        Ok(Self {
            dashboard: DashboardService::new(gateway.clone()),
            learning: LearningService::new(gateway.clone()),
            onboarding: Mutex::new(OnboardingFlow::new(gateway.clone())),
            challenge: Mutex::new(None),
            learning_page: Mutex::new(None),
            config,
            session,
            gateway,
        })
    }

    /// Drop every in-progress flow so the next user starts clean.
    pub async fn reset_flows(&self) {
        debug!("Resetting view state");
        *self.onboarding.lock().await = OnboardingFlow::new(self.gateway.clone());
        *self.challenge.lock().await = None;
        *self.learning_page.lock().await = None;
    }
}
