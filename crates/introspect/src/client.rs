//! Configurable HTTP client for probe and introspection requests.
//!
//! Server errors (5xx) are retried with exponential backoff. Every other
//! outcome, including 4xx responses carrying GraphQL error messages, is
//! handed back to the caller after a single attempt.

use crate::{ProbeResponse, RequestBody, Result, TransportError, INTROSPECTION_QUERY};
use graphql_recon_schema::Schema;
use reqwest::Method;
use std::collections::HashMap;
use std::time::Duration;

/// Default timeout for a single request (30 seconds).
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Default number of retries on 5xx responses.
const DEFAULT_RETRIES: u32 = 5;

/// Default backoff factor; the n-th retry waits `factor * 2^(n-1)`.
const DEFAULT_BACKOFF_SECS: u64 = 2;

/// A configurable client for sending GraphQL documents to a target endpoint.
///
/// # Examples
///
/// ```no_run
/// use graphql_recon_introspect::ProbeClient;
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ProbeClient::new()
///     .with_header("Authorization", "Bearer my-token")
///     .with_timeout(Duration::from_secs(60))
///     .with_retries(3);
///
/// let response = client
///     .probe("https://api.example.com/graphql", "query { FUZZ }")
///     .await?;
/// println!("{}: {}", response.status, response.body);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ProbeClient {
    headers: HashMap<String, String>,
    timeout: Duration,
    connect_timeout: Duration,
    retries: u32,
    backoff: Duration,
}

impl Default for ProbeClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ProbeClient {
    /// Creates a client with default settings.
    ///
    /// Default settings:
    /// - 30 second request timeout
    /// - 10 second connection timeout
    /// - 5 retries on server errors, backing off 2s, 4s, 8s, ...
    /// - No custom headers
    #[must_use]
    pub fn new() -> Self {
        Self {
            headers: HashMap::new(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            retries: DEFAULT_RETRIES,
            backoff: Duration::from_secs(DEFAULT_BACKOFF_SECS),
        }
    }

    /// Adds a custom HTTP header sent with every request.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds multiple HTTP headers from an iterator.
    #[must_use]
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.into(), value.into());
        }
        self
    }

    /// Sets the maximum time for a single attempt (connection + transfer).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the maximum time allowed to establish a connection.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets how many times a 5xx response is retried.
    #[must_use]
    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Sets the backoff factor between retries.
    #[must_use]
    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Sends `body` to `url` with the given HTTP method.
    ///
    /// # Errors
    ///
    /// - [`TransportError::Network`] if the request cannot be sent
    /// - [`TransportError::Http`] if the server still answers 5xx after all retries
    #[tracing::instrument(skip(self, body))]
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        body: &RequestBody,
    ) -> Result<ProbeResponse> {
        let client = self.http_client()?;
        let mut last_response = None;

        for attempt in 0..=self.retries {
            if attempt > 0 {
                let delay = self.backoff_delay(attempt);
                tracing::info!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    "Retrying after delay"
                );
                tokio::time::sleep(delay).await;
            }

            let response = self.send_once(&client, method.clone(), url, body).await?;
            if !response.is_server_error() {
                return Ok(response);
            }

            tracing::warn!(attempt, status = response.status, "Server error");
            last_response = Some(response);
        }

        let response = last_response
            .ok_or_else(|| TransportError::Network("No attempts made".to_string()))?;
        tracing::error!(status = response.status, body = %response.body, "Retries exhausted");
        Err(TransportError::Http(response.status, response.body))
    }

    /// Sends a POST request.
    pub async fn post(&self, url: &str, body: &RequestBody) -> Result<ProbeResponse> {
        self.send(Method::POST, url, body).await
    }

    /// Sends a GraphQL document as a `{"query": ...}` POST request.
    pub async fn probe(&self, url: &str, document: &str) -> Result<ProbeResponse> {
        self.post(url, &RequestBody::query(document)).await
    }

    /// Fetches the schema through a regular introspection query.
    ///
    /// # Errors
    ///
    /// Besides transport failures, a non-2xx answer is reported as
    /// [`TransportError::Http`], a non-JSON body as [`TransportError::Parse`]
    /// and a payload the schema codec rejects as [`TransportError::Schema`].
    #[tracing::instrument(skip(self))]
    pub async fn fetch_schema(&self, url: &str) -> Result<Schema> {
        let response = self.probe(url, INTROSPECTION_QUERY).await?;
        if !response.is_success() {
            tracing::error!(status = response.status, "Introspection request rejected");
            return Err(TransportError::Http(response.status, response.body));
        }

        let schema = Schema::from_value(response.json()?)?;
        tracing::info!(types = schema.len(), "Introspection successful");
        Ok(schema)
    }

    fn http_client(&self) -> Result<reqwest::Client> {
        tracing::debug!("Creating HTTP client with timeouts");
        reqwest::Client::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to create HTTP client: {e}")))
    }

    /// Executes a single request without retry logic.
    async fn send_once(
        &self,
        client: &reqwest::Client,
        method: Method,
        url: &str,
        body: &RequestBody,
    ) -> Result<ProbeResponse> {
        let mut request = client.request(method, url);

        for (name, value) in &self.headers {
            request = request.header(name, value);
        }

        request = match body {
            RequestBody::Raw(text) => request.body(text.clone()),
            RequestBody::Json(value) => request.json(value),
        };

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        tracing::debug!(status, "Received response");

        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        Ok(ProbeResponse { status, body })
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        self.backoff
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }
}
