//! Transport implementation using reqwest.
//!
//! This adapter implements the `Transport` port using the reqwest library.
//! It is the only place the client touches the network.

use std::time::Duration;

use async_trait::async_trait;
use nimble_application::ports::{Transport, TransportError};
use nimble_domain::{HttpMethod, MIME_JSON, StatusCode, TransportRequest};
use reqwest::{Client, Method, Url};
use tracing::{debug, warn};

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const MAX_REDIRECTS: usize = 10;

/// The `User-Agent` sent when none is configured.
#[must_use]
pub fn default_user_agent() -> String {
    format!("nimble-survey/{}", env!("CARGO_PKG_VERSION"))
}

/// HTTP transport backed by `reqwest::Client`.
///
/// Only responses with a status in `200..=299` and a non-empty body
/// are handed back; everything else becomes a [`TransportError`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Creates a transport with the default user agent and timeout.
    ///
    /// Default configuration:
    /// - Request timeout: 30 seconds
    /// - Follow redirects: up to 10
    /// - TLS verification: enabled
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_options(&default_user_agent(), DEFAULT_TIMEOUT)
    }

    /// Creates a transport with a custom user agent and request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn with_options(user_agent: &str, timeout: Duration) -> Result<Self, TransportError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| TransportError::Other(e.to_string()))?;

        Ok(Self { client, timeout })
    }

    /// Creates a transport around an existing reqwest client.
    #[must_use]
    pub const fn with_client(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }

    /// Maps reqwest errors to `TransportError`.
    fn map_error(&self, error: &reqwest::Error) -> TransportError {
        if error.is_timeout() {
            return TransportError::Timeout {
                timeout_ms: u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX),
            };
        }
        if error.is_connect() || error.is_request() || error.is_body() {
            return TransportError::Network(error.to_string());
        }
        TransportError::Other(error.to_string())
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<Vec<u8>, TransportError> {
        let url = Url::parse(&request.url)
            .map_err(|e| TransportError::InvalidUrl(format!("{e}: {}", request.url)))?;

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url);
        if request.header("accept").is_none() {
            builder = builder.header(reqwest::header::ACCEPT, MIME_JSON);
        }
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        debug!(method = %request.method, url = %request.url, "Sending request");
        let response = builder.send().await.map_err(|e| self.map_error(&e))?;

        let status = StatusCode::new(response.status().as_u16());
        if !status.is_success() {
            warn!(method = %request.method, url = %request.url, %status, "Request rejected");
            return Err(TransportError::UnexpectedStatus { status });
        }

        let body = response.bytes().await.map_err(|e| self.map_error(&e))?;
        if body.is_empty() {
            warn!(url = %request.url, %status, "Empty response body");
            return Err(TransportError::EmptyBody);
        }

        debug!(url = %request.url, %status, bytes = body.len(), "Received response");
        Ok(body.to_vec())
    }
}
