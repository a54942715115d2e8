//! # HTTP Client Utilities
//!
//! Shared HTTP plumbing for provider adapters.
//!
//! Every external provider (geocoder, routing, carrier) talks JSON over
//! HTTP. This module provides a thin [`reqwest`] wrapper with configurable
//! timeouts and uniform error mapping into [`ProviderError`], so adapters
//! only deal with their own payload shapes.

use reqwest::header::HeaderMap;
use reqwest::{Client, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

/// Error type for provider HTTP operations.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Request timed out.
    #[error("provider timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// Network or connection error.
    #[error("provider connection error: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// Authentication or authorization failure.
    #[error("provider authentication error: {message}")]
    Authentication {
        /// Error message.
        message: String,
    },

    /// Rate limit exceeded.
    #[error("provider rate limit exceeded: {message}")]
    RateLimited {
        /// Error message.
        message: String,
    },

    /// The provider rejected the request parameters.
    #[error("provider rejected request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// The requested resource does not exist upstream.
    #[error("provider resource not found: {message}")]
    NotFound {
        /// Error message.
        message: String,
    },

    /// Response could not be parsed or violated the provider contract.
    #[error("provider protocol error: {message}")]
    Protocol {
        /// Error message.
        message: String,
    },

    /// Internal adapter error.
    #[error("provider internal error: {message}")]
    Internal {
        /// Error message.
        message: String,
    },
}

impl ProviderError {
    /// Creates a timeout error.
    #[must_use]
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates an authentication error.
    #[must_use]
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Creates a rate limit error.
    #[must_use]
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::RateLimited {
            message: message.into(),
        }
    }

    /// Creates an invalid request error.
    #[must_use]
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Creates a protocol error.
    #[must_use]
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Returns true if retrying the same request could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Timeout { .. } | Self::Connection { .. } | Self::RateLimited { .. }
        )
    }
}

/// Result type for provider HTTP operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// HTTP client wrapper shared by provider adapters.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    timeout_ms: u64,
}

impl HttpClient {
    /// Creates a new HTTP client with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Internal` if the underlying client cannot be
    /// built.
    pub fn new(timeout_ms: u64) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .build()
            .map_err(|e| ProviderError::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, timeout_ms })
    }

    /// Creates a new HTTP client that sends `default_headers` on every
    /// request.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Internal` if the underlying client cannot be
    /// built.
    pub fn with_headers(timeout_ms: u64, default_headers: HeaderMap) -> ProviderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(timeout_ms))
            .default_headers(default_headers)
            .build()
            .map_err(|e| ProviderError::internal(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, timeout_ms })
    }

    /// Returns the configured timeout in milliseconds.
    #[inline]
    #[must_use]
    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    /// Makes a GET request and deserializes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Timeout`/`Connection` if the request fails and
    /// `ProviderError::Protocol` if the response cannot be parsed.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ProviderResult<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        handle_response(response).await
    }

    /// Makes a POST request with a JSON body and deserializes the JSON
    /// response.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Timeout`/`Connection` if the request fails and
    /// `ProviderError::Protocol` if the response cannot be parsed.
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> ProviderResult<T> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        handle_response(response).await
    }

    /// Makes a POST request with a JSON body and per-request headers.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError::Timeout`/`Connection` if the request fails and
    /// `ProviderError::Protocol` if the response cannot be parsed.
    pub async fn post_json_with_headers<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        headers: HeaderMap,
    ) -> ProviderResult<T> {
        let response = self
            .client
            .post(url)
            .json(body)
            .headers(headers)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        handle_response(response).await
    }
}

/// Checks status and deserializes a JSON response body.
async fn handle_response<T: DeserializeOwned>(response: Response) -> ProviderResult<T> {
    let status = response.status();

    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::protocol(format!("failed to parse response: {e}")))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(map_status_error(status, &body))
    }
}

/// Maps a reqwest error to a [`ProviderError`].
fn map_reqwest_error(error: reqwest::Error) -> ProviderError {
    if error.is_timeout() {
        ProviderError::timeout("request timed out")
    } else if error.is_connect() {
        ProviderError::connection(format!("connection failed: {error}"))
    } else {
        ProviderError::connection(format!("request failed: {error}"))
    }
}

/// Maps an HTTP status code to a [`ProviderError`].
fn map_status_error(status: StatusCode, body: &str) -> ProviderError {
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ProviderError::invalid_request(format!("bad request: {body}"))
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::authentication(format!("authentication failed: {body}"))
        }
        StatusCode::NOT_FOUND => ProviderError::not_found(format!("resource not found: {body}")),
        StatusCode::TOO_MANY_REQUESTS => ProviderError::rate_limited("rate limit exceeded"),
        StatusCode::INTERNAL_SERVER_ERROR
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => {
            ProviderError::connection(format!("server error ({status}): {body}"))
        }
        _ => ProviderError::protocol(format!("HTTP error ({status}): {body}")),
    }
}
