//! Auth gateway that mirrors successful token grants into a store.

use async_trait::async_trait;
use nimble_domain::AuthToken;
use tracing::{debug, info, warn};

use crate::error::AuthError;
use crate::ports::{AuthService, TokenProvider, TokenStore};

/// Wraps an [`AuthService`] and keeps a [`TokenStore`] in step with it.
///
/// - `login` and `refresh_token` save the issued token before returning.
/// - `logout` clears the store first, then calls the service. The local
///   token is gone even if the server call fails.
/// - `register` and `forgot_password` pass through untouched.
///
/// Store failures are logged and never change the outcome of the call.
#[derive(Debug)]
pub struct AuthServiceWithStore<S, T> {
    service: S,
    store: T,
}

impl<S, T> AuthServiceWithStore<S, T>
where
    S: AuthService,
    T: TokenStore,
{
    /// Create a new gateway.
    #[must_use]
    pub const fn new(service: S, store: T) -> Self {
        Self { service, store }
    }

    /// The wrapped token store.
    #[must_use]
    pub const fn store(&self) -> &T {
        &self.store
    }

    async fn persist(&self, token: &AuthToken) {
        match self.store.save(token).await {
            Ok(()) => debug!(
                access_token = %AuthToken::preview(&token.access_token),
                expires_in = token.expires_in,
                "Stored auth token"
            ),
            Err(e) => warn!(error = %e, "Failed to store auth token"),
        }
    }
}

#[async_trait]
impl<S, T> AuthService for AuthServiceWithStore<S, T>
where
    S: AuthService,
    T: TokenStore,
{
    async fn login(&self, email: &str, password: &str) -> Result<AuthToken, AuthError> {
        let token = self.service.login(email, password).await?;
        info!("Login succeeded");
        self.persist(&token).await;
        Ok(token)
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> Result<(), AuthError> {
        self.service
            .register(email, password, password_confirmation)
            .await
    }

    async fn logout(&self, token: &str) -> Result<(), AuthError> {
        if let Err(e) = self.store.delete().await {
            warn!(error = %e, "Failed to clear stored auth token");
        }
        let result = self.service.logout(token).await;
        if let Err(e) = &result {
            warn!(error = %e, "Logout request failed after clearing local token");
        }
        result
    }

    async fn forgot_password(&self, email: &str) -> Result<String, AuthError> {
        self.service.forgot_password(email).await
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<AuthToken, AuthError> {
        let token = self.service.refresh_token(refresh_token).await?;
        info!("Token refresh succeeded");
        self.persist(&token).await;
        Ok(token)
    }
}

#[async_trait]
impl<S, T> TokenProvider for AuthServiceWithStore<S, T>
where
    S: AuthService,
    T: TokenStore,
{
    async fn token(&self) -> Option<AuthToken> {
        self.store.load().await
    }

    async fn refresh_token(&self, refresh_token: &str) -> Result<AuthToken, AuthError> {
        AuthService::refresh_token(self, refresh_token).await
    }
}
