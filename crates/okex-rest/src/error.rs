//! OKEx REST API error types.

use auth::AuthError;
use common::ConfigError;
use orderbook::OrderBookError;
use rest_client::RestError;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when interacting with the OKEx REST API.
#[derive(Debug, Error)]
pub enum OkexRestError {
    /// REST client error (HTTP status, timeout, network, non-JSON body).
    #[error("REST client error: {0}")]
    Rest(#[from] RestError),

    /// Authentication error.
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Invalid client configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// OKEx API error (returned by the exchange in a 2xx body).
    #[error("OKEx API error on {endpoint}, code {code}: {message}")]
    ApiError {
        endpoint: String,
        /// OKEx error code.
        code: String,
        /// Error message.
        message: String,
    },

    /// Response is JSON but does not match the expected schema.
    #[error("Unexpected response from {endpoint}: {message}")]
    Parse { endpoint: String, message: String },

    /// The exchange does not offer this operation.
    #[error("{0}() not available for OKEX")]
    Unsupported(&'static str),

    /// Invalid argument supplied by the caller; no request was sent.
    #[error("Invalid argument: {0}")]
    Validation(String),

    /// Order book could not be transformed.
    #[error("Order book error: {0}")]
    OrderBook(#[from] OrderBookError),
}

impl OkexRestError {
    /// Inspect a decoded body for an exchange-side error.
    ///
    /// OKEx reports failures as `{"error_code": "30008", "error_message": "..."}`,
    /// and successful v3 responses may still carry `"error_code": ""` or `"0"`.
    /// Only a non-empty, non-zero code is an error.
    pub fn check_api_response(endpoint: &str, body: &Value) -> Result<(), Self> {
        let Some(code) = body.get("error_code") else {
            return Ok(());
        };

        let code = match code {
            Value::Null => return Ok(()),
            Value::String(s) if s.is_empty() || s == "0" => return Ok(()),
            Value::Number(n) if n.as_i64() == Some(0) => return Ok(()),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        let message = body
            .get("error_message")
            .or_else(|| body.get("message"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Err(Self::ApiError {
            endpoint: endpoint.to_string(),
            code,
            message,
        })
    }

    /// Schema mismatch on `endpoint`.
    pub(crate) fn parse(endpoint: &str, message: impl Into<String>) -> Self {
        Self::Parse {
            endpoint: endpoint.to_string(),
            message: message.into(),
        }
    }

    /// Non-success HTTP status, timeout, or network failure.
    pub fn is_transport(&self) -> bool {
        match self {
            Self::Rest(rest_err) => rest_err.is_transport(),
            _ => false,
        }
    }

    /// The server answered, but with a body that is not usable: not JSON,
    /// wrong shape, or an explicit error code.
    pub fn is_protocol(&self) -> bool {
        match self {
            Self::Rest(rest_err) => rest_err.is_invalid_json(),
            Self::ApiError { .. } | Self::Parse { .. } => true,
            _ => false,
        }
    }

    /// The operation is not offered by OKEx.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }

    /// The caller passed arguments that were rejected before any request.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Config(_))
    }
}
