//! Generic REST client wrapper around reqwest.

use crate::error::{excerpt, RestError};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Generic REST client for making HTTP requests.
pub struct RestClient {
    client: Client,
    base_url: String,
}

impl RestClient {
    /// Create a new REST client with the given base URL.
    ///
    /// # Arguments
    /// * `base_url` - Base URL for all requests (e.g., "https://www.okex.com")
    /// * `timeout` - Request timeout duration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RestError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RestError::RequestBuild(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a GET request.
    ///
    /// # Arguments
    /// * `path` - Request path including any query string (e.g., "/api/spot/v3/orders_pending?instrument_id=BTC-USDT")
    /// * `headers` - Additional headers
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        headers: &[(&str, String)],
    ) -> Result<T, RestError> {
        let url = self.build_url(path);
        tracing::debug!(url = %url, "GET request");

        let request = with_headers(self.client.get(&url), headers);
        self.send(path, request).await
    }

    /// Make a POST request with a pre-serialized body.
    ///
    /// The body is sent byte for byte, so callers that sign it can rely on
    /// the signed and transmitted payloads being identical.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: String,
        headers: &[(&str, String)],
    ) -> Result<T, RestError> {
        let url = self.build_url(path);
        tracing::debug!(url = %url, body = %body, "POST request");

        let request = with_headers(self.client.post(&url), headers).body(body);
        self.send(path, request).await
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, RestError> {
        let response = request
            .send()
            .await
            .map_err(|e| RestError::from_reqwest(path, e))?;
        self.handle_response(path, response).await
    }

    /// Handle HTTP response and deserialize JSON body.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        path: &str,
        response: Response,
    ) -> Result<T, RestError> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RestError::from_reqwest(path, e))?;

        if !status.is_success() {
            tracing::warn!(endpoint = %path, status = status.as_u16(), "HTTP request failed");
            return Err(RestError::HttpError {
                endpoint: path.to_string(),
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(endpoint = %path, error = %e, "Failed to parse response");
            RestError::InvalidJson {
                endpoint: path.to_string(),
                body: excerpt(&body),
            }
        })
    }
}

fn with_headers(mut request: RequestBuilder, headers: &[(&str, String)]) -> RequestBuilder {
    for (key, value) in headers {
        request = request.header(*key, value.as_str());
    }
    request
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
