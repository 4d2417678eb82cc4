/// LexTrek HTTP client implementation.
///
/// This module provides `LexTrekClient` for making synchronous requests to the
/// LexTrek query endpoint, along with its error type and builder.
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::config::{Config, DEFAULT_TIMEOUT_SECONDS};

/// Connect timeout applied independently of the request timeout.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Errors that can occur when talking to the LexTrek endpoint.
#[derive(Debug, Error)]
pub enum LexTrekError {
    /// Network-related errors (connection failures, DNS resolution, etc.)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// Request or response timeout errors
    #[error("Request timed out after {seconds} seconds")]
    Timeout {
        seconds: u64,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP errors with status code
    #[error("HTTP error: status {status}")]
    Http { status: u16 },

    /// Response body is not the expected JSON object
    #[error("Invalid response body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Invalid URL configuration error
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Body of a successful LexTrek response.
///
/// Only `answer` is read; any other fields the service returns are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub answer: Option<String>,
}

/// Builder for constructing `LexTrekClient` instances.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use lextrek::lextrek::LexTrekClientBuilder;
///
/// let client = LexTrekClientBuilder::new()
///     .endpoint_url("http://localhost:8000/query")
///     .timeout(Duration::from_secs(30))
///     .build()
///     .expect("Failed to create client");
/// assert_eq!(client.endpoint_url(), "http://localhost:8000/query");
/// ```
#[derive(Debug, Default)]
pub struct LexTrekClientBuilder {
    endpoint_url: Option<String>,
    timeout: Option<Duration>,
}

impl LexTrekClientBuilder {
    /// Creates a new `LexTrekClientBuilder` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder pre-populated from the resolved configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new()
            .endpoint_url(config.endpoint_url())
            .timeout(Duration::from_secs(config.timeout_seconds()))
    }

    /// Sets the full URL the question is posted to.
    pub fn endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.endpoint_url = Some(url.into());
        self
    }

    /// Sets the overall request timeout. Defaults to 60 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the `LexTrekClient` with the configured settings.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if no endpoint was set or it does not parse, and
    /// `Network` if the underlying HTTP client cannot be constructed.
    pub fn build(self) -> Result<LexTrekClient, LexTrekError> {
        let endpoint_url = self
            .endpoint_url
            .ok_or_else(|| LexTrekError::InvalidUrl("no endpoint URL configured".to_string()))?;

        reqwest::Url::parse(&endpoint_url)
            .map_err(|e| LexTrekError::InvalidUrl(format!("{}: {}", endpoint_url, e)))?;

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));

        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS).min(timeout))
            .build()
            .map_err(LexTrekError::Network)?;

        Ok(LexTrekClient {
            client,
            endpoint_url,
            timeout,
        })
    }
}

/// Synchronous HTTP client for the LexTrek query endpoint.
///
/// Each call issues exactly one request; failures are returned, never retried.
pub struct LexTrekClient {
    client: reqwest::blocking::Client,
    endpoint_url: String,
    timeout: Duration,
}

/// Trait for LexTrek query operations.
///
/// Lets the pipeline be exercised against a fake endpoint in tests.
pub trait LexTrekClientTrait: Send + Sync {
    /// Posts `{"question": question}` to the endpoint and decodes the reply.
    fn query(&self, question: &str) -> Result<QueryResponse, LexTrekError>;
}

impl LexTrekClient {
    /// Returns the endpoint URL configured for this client.
    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    /// Returns the request timeout configured for this client.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Maps a transport error, separating timeouts from other failures.
    fn transport_error(&self, error: reqwest::Error) -> LexTrekError {
        if error.is_timeout() {
            LexTrekError::Timeout {
                seconds: self.timeout.as_secs(),
                source: error,
            }
        } else {
            LexTrekError::Network(error)
        }
    }

    fn query_internal(&self, question: &str) -> Result<QueryResponse, LexTrekError> {
        let request_body = serde_json::json!({ "question": question });

        let response = self
            .client
            .post(&self.endpoint_url)
            .json(&request_body)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LexTrekError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|e| self.transport_error(e))?;
        parse_response(&body)
    }
}

impl LexTrekClientTrait for LexTrekClient {
    fn query(&self, question: &str) -> Result<QueryResponse, LexTrekError> {
        tracing::debug!(endpoint = %self.endpoint_url, "posting question");
        self.query_internal(question)
    }
}

/// Decodes a response body into a `QueryResponse`.
///
/// The body must be a JSON object; a missing or `null` `answer` decodes to `None`.
fn parse_response(body: &str) -> Result<QueryResponse, LexTrekError> {
    serde_json::from_str(body).map_err(LexTrekError::Serialization)
}
