//! Application error types

use thiserror::Error;

use crate::ports::TransportError;

/// Errors reported by the remote auth service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The request never produced a usable response.
    #[error("auth request failed: {0}")]
    Transport(#[from] TransportError),

    /// The response body did not match the expected shape.
    #[error("invalid auth response: {0}")]
    InvalidData(String),
}

/// Errors reported while fetching survey resources.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The request never produced a usable response.
    #[error("survey request failed: {0}")]
    Transport(#[from] TransportError),

    /// The response body did not match the expected shape.
    #[error("invalid survey response: {0}")]
    InvalidData(String),

    /// No token is stored; the user has to log in.
    #[error("no stored token, login required")]
    NoToken,

    /// Refreshing an expired token did not leave a fresh one behind.
    #[error("token refresh failed")]
    RefreshToken {
        /// The refresh failure, when the refresh call itself failed.
        #[source]
        cause: Option<AuthError>,
    },
}

impl LoadError {
    /// Returns true if the caller should send the user back to login.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(self, Self::NoToken | Self::RefreshToken { .. })
    }
}
