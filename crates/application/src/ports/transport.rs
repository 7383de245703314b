//! Transport port
//!
//! Sends an abstract request and hands back the raw response body.

use async_trait::async_trait;
use nimble_domain::{StatusCode, TransportRequest};
use thiserror::Error;

/// Errors produced by a transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The URL could not be parsed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// Connection, DNS or I/O failure.
    #[error("network error: {0}")]
    Network(String),

    /// The request did not complete in time.
    #[error("request timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed.
        timeout_ms: u64,
    },

    /// The server answered outside the 2xx range.
    #[error("unexpected status {status}")]
    UnexpectedStatus {
        /// The status the server answered with.
        status: StatusCode,
    },

    /// The server answered 2xx with no body.
    #[error("response body is empty")]
    EmptyBody,

    /// Any other failure.
    #[error("{0}")]
    Other(String),
}

/// Port for performing HTTP requests.
///
/// Implementations accept only status codes in `200..=299` with a
/// non-empty body; anything else is reported as a `TransportError`.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and returns the response body.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, a non-2xx status or an empty body.
    async fn send(&self, request: TransportRequest) -> Result<Vec<u8>, TransportError>;
}
