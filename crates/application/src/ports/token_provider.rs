//! Token provider port

use async_trait::async_trait;
use nimble_domain::AuthToken;

use crate::error::AuthError;

/// What the authenticated loader needs from auth: the current token and
/// a way to refresh it.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns the currently stored token, fresh or not.
    async fn token(&self) -> Option<AuthToken>;

    /// Refreshes the token. On success the new token is stored before
    /// this returns.
    async fn refresh_token(&self, refresh_token: &str) -> Result<AuthToken, AuthError>;
}
