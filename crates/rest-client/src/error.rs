//! REST client error types.

use thiserror::Error;

/// Longest response body excerpt kept in an error.
pub(crate) const MAX_BODY_EXCERPT: usize = 512;

/// Errors that can occur during REST API calls.
#[derive(Debug, Error)]
pub enum RestError {
    /// Non-success HTTP status.
    #[error("HTTP error on {endpoint}: {status} - {body}")]
    HttpError {
        /// Request path that failed.
        endpoint: String,
        /// HTTP status code.
        status: u16,
        /// Truncated response body.
        body: String,
    },

    /// Request timed out.
    #[error("Request timeout on {endpoint}")]
    Timeout { endpoint: String },

    /// Connection error (network issue).
    #[error("Connection error on {endpoint}: {message}")]
    Connection { endpoint: String, message: String },

    /// Response status was fine but the body is not JSON.
    #[error("Invalid JSON from {endpoint}: {body}")]
    InvalidJson {
        endpoint: String,
        /// Truncated response body.
        body: String,
    },

    /// Failed to build the HTTP client or request.
    #[error("Request build error: {0}")]
    RequestBuild(String),
}

impl RestError {
    /// Map a `reqwest` failure for `endpoint` onto the error kinds above.
    pub(crate) fn from_reqwest(endpoint: &str, err: reqwest::Error) -> Self {
        let endpoint = endpoint.to_string();

        if err.is_timeout() {
            RestError::Timeout { endpoint }
        } else if err.is_builder() {
            RestError::RequestBuild(err.to_string())
        } else if let Some(status) = err.status() {
            RestError::HttpError {
                endpoint,
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            RestError::Connection {
                endpoint,
                message: err.to_string(),
            }
        }
    }

    /// True for failures below the JSON layer: status, timeout, network.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            RestError::HttpError { .. } | RestError::Timeout { .. } | RestError::Connection { .. }
        )
    }

    /// True if the server answered but the body could not be read as JSON.
    pub fn is_invalid_json(&self) -> bool {
        matches!(self, RestError::InvalidJson { .. })
    }
}

/// Shorten a response body for inclusion in an error message.
pub(crate) fn excerpt(body: &str) -> String {
    match body.char_indices().nth(MAX_BODY_EXCERPT) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
