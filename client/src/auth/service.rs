//! Core logic for the client-side authentication flow.

use tracing::info;
use validator::Validate;

use crate::api::ApiClient;
use crate::auth::models::{AuthToken, SignUpRequest};
use crate::errors::{ClientError, ClientResult};

/// Authentication service for login, sign-up and logout.
pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService instance
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Authenticates and persists the session on success. A failed login
    /// leaves the session store untouched.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<AuthToken> {
        let token = self.client.login(username, password).await?;

        let session = self.client.session();
        session.set_token(token.clone()).await?;
        session.set_username(username).await?;
        info!(username, "login succeeded");

        Ok(token)
    }

    /// Registers a new account. Does not log the new user in; callers go
    /// through [`Self::login`] afterwards.
    pub async fn sign_up(&self, request: SignUpRequest) -> ClientResult<AuthToken> {
        if let Err(errors) = request.validate() {
            return Err(ClientError::from_validation(errors));
        }

        let token = self.client.sign_up(&request).await?;
        info!(username = %request.username, "account created");
        Ok(token)
    }

    /// Clears the session from memory and persistent storage.
    pub async fn logout(&self) -> ClientResult<()> {
        self.client.session().clear().await?;
        info!("logged out");
        Ok(())
    }
}
