//! The backend client and its request helpers.

use std::time::Duration;

use pulse_types::{ClientError, HealthStatus};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{map_http_status, map_reqwest_error};

/// Connect timeout applied to every request, streamed ones included.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the monitoring backend's REST API.
///
/// Cheap to clone; clones share one connection pool.
///
/// # Example
///
/// ```no_run
/// use pulse_client::{ClientConfig, PulseClient};
///
/// # fn demo() -> Result<(), pulse_types::ClientError> {
/// let client = PulseClient::new(ClientConfig::default())?
///     .base_url("http://127.0.0.1:8000/api");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PulseClient {
    /// Base URL including the `/api` prefix, without a trailing slash.
    pub(crate) base_url: String,
    /// Total timeout for non-streaming requests.
    pub(crate) timeout: Duration,
    /// Shared HTTP client.
    pub(crate) http: reqwest::Client,
}

impl PulseClient {
    /// Build a client from `config`.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| ClientError::Network(Box::new(e)))?;
        Ok(Self {
            base_url: normalize_base_url(&config.base_url),
            timeout: config.timeout,
            http,
        })
    }

    /// Override the base URL.
    ///
    /// Useful for testing with a local mock server.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&url.into());
        self
    }

    /// Override the timeout for non-streaming requests.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured base URL.
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL of `path`, which starts with `/`.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Send `request` with the client timeout; non-success statuses become
    /// errors.
    pub(crate) async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ClientError> {
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| map_reqwest_error(e, self.timeout))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::debug!(status = status.as_u16(), "request failed");
        Err(map_http_status(status, &body))
    }

    /// Send `request` and decode the JSON body.
    pub(crate) async fn fetch<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        let response = self.send(request).await?;
        let text = response
            .text()
            .await
            .map_err(|e| map_reqwest_error(e, self.timeout))?;
        serde_json::from_str(&text)
            .map_err(|e| ClientError::Decode(format!("invalid JSON response: {e}")))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");
        self.fetch(self.http.get(&url)).await
    }

    pub(crate) async fn get_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!(url = %url, "GET");
        self.fetch(self.http.get(&url).query(query)).await
    }

    pub(crate) async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!(url = %url, "POST");
        self.fetch(self.http.post(&url).json(body)).await
    }

    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "POST");
        self.fetch(self.http.post(&url)).await
    }

    pub(crate) async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path);
        tracing::debug!(url = %url, "PUT");
        self.fetch(self.http.put(&url).json(body)).await
    }

    pub(crate) async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "PUT");
        self.fetch(self.http.put(&url)).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "DELETE");
        self.fetch(self.http.delete(&url)).await
    }

    /// `DELETE` a route that answers `204 No Content`; any body is ignored.
    pub(crate) async fn delete_no_content(&self, path: &str) -> Result<(), ClientError> {
        let url = self.url(path);
        tracing::debug!(url = %url, "DELETE");
        self.send(self.http.delete(&url)).await?;
        Ok(())
    }

    /// `GET /health`.
    pub async fn health(&self) -> Result<HealthStatus, ClientError> {
        self.get("/health").await
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
