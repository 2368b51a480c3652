//! Token authentication against the REST API
//!
//! Implements the session store's [`AuthClientTrait`] seam.

use async_trait::async_trait;
use pathwise_common::{AuthClientTrait, AuthError, Credential};
use pathwise_domain::{LoginRequest, RegisterRequest, RegisterResponse, TokenResponse, User};
use tracing::{info, instrument};

use super::client::ApiClient;
use super::endpoints;

/// Login, registration and credential validation
#[derive(Debug, Clone)]
pub struct ApiAuthClient {
    client: ApiClient,
}

impl ApiAuthClient {
    /// `client` should be anonymous; each call decides which credential to send.
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthClientTrait for ApiAuthClient {
    #[instrument(skip(self, password))]
    async fn obtain_token(&self, username: &str, password: &str) -> Result<Credential, AuthError> {
        let request = LoginRequest { username: username.to_string(), password: password.to_string() };
        let response: TokenResponse = self.client.post(endpoints::AUTH_TOKEN, &request).await?;
        info!("Token issued");
        Ok(Credential::new(response.token))
    }

    #[instrument(skip(self, email, password))]
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<Credential, AuthError> {
        let request = RegisterRequest::new(username, email, password);
        let response: RegisterResponse = self.client.post(endpoints::REGISTER, &request).await?;
        info!(user_id = response.user.id, "Account registered");
        Ok(Credential::new(response.token))
    }

    #[instrument(skip_all)]
    async fn validate(&self, credential: &Credential) -> Result<(), AuthError> {
        let _user: User = self.client.get_as(endpoints::CURRENT_USER, credential).await?;
        Ok(())
    }
}
