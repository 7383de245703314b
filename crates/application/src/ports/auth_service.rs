//! Auth service port

use async_trait::async_trait;
use nimble_domain::AuthToken;

use crate::error::AuthError;

/// The auth operations offered by the survey backend.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Exchanges credentials for a token.
    async fn login(&self, email: &str, password: &str) -> Result<AuthToken, AuthError>;

    /// Creates an account.
    async fn register(
        &self,
        email: &str,
        password: &str,
        password_confirmation: &str,
    ) -> Result<(), AuthError>;

    /// Revokes the given access token.
    async fn logout(&self, token: &str) -> Result<(), AuthError>;

    /// Requests a reset email; returns the server's message.
    async fn forgot_password(&self, email: &str) -> Result<String, AuthError>;

    /// Exchanges a refresh token for a new token.
    async fn refresh_token(&self, refresh_token: &str) -> Result<AuthToken, AuthError>;
}
