//! Client configuration: which server to talk to and how long to wait.

use crate::environment::OkexEnvironment;
use std::time::Duration;
use thiserror::Error;

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: f64 = 9.5;

/// Errors produced while building a [`ClientConfig`].
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The API server URL is empty or not http(s).
    #[error("invalid API server URL '{0}'")]
    InvalidServer(String),

    /// The timeout is zero, negative, or not a finite number.
    #[error("invalid timeout '{0}', expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// Connection settings for the exchange client.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    api_server: String,
    timeout: Duration,
}

impl ClientConfig {
    /// Create a validated configuration.
    ///
    /// # Arguments
    /// * `api_server` - Base URL, e.g. `https://www.okex.com`
    /// * `timeout_secs` - Per-request timeout in seconds
    pub fn new(api_server: &str, timeout_secs: f64) -> Result<Self, ConfigError> {
        let api_server = api_server.trim().trim_end_matches('/');
        if api_server.is_empty()
            || !(api_server.starts_with("http://") || api_server.starts_with("https://"))
        {
            return Err(ConfigError::InvalidServer(api_server.to_string()));
        }

        if !timeout_secs.is_finite() || timeout_secs <= 0.0 {
            return Err(ConfigError::InvalidTimeout(timeout_secs.to_string()));
        }

        Ok(Self {
            api_server: api_server.to_string(),
            timeout: Duration::from_secs_f64(timeout_secs),
        })
    }

    /// Configuration for a known environment with the default timeout.
    pub fn for_environment(environment: OkexEnvironment) -> Self {
        Self {
            api_server: environment.rest_base_url().to_string(),
            timeout: Duration::from_secs_f64(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Load configuration from the process environment.
    ///
    /// - `OKEX_API_SERVER` overrides the URL derived from `OKEX_ENVIRONMENT`
    /// - `OKEX_TIMEOUT_SECS` sets the timeout (default 9.5)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = lookup("OKEX_ENVIRONMENT")
            .and_then(|s| s.parse::<OkexEnvironment>().ok())
            .unwrap_or_default();

        let api_server =
            lookup("OKEX_API_SERVER").unwrap_or_else(|| environment.rest_base_url().to_string());

        let timeout_secs = match lookup("OKEX_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Self::new(&api_server, timeout_secs)
    }

    /// Base URL without a trailing slash.
    pub fn api_server(&self) -> &str {
        &self.api_server
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_environment(OkexEnvironment::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_new_strips_trailing_slash() {
        let config = ClientConfig::new("https://www.okex.com/", 5.0).unwrap();
        assert_eq!(config.api_server(), "https://www.okex.com");
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn test_new_rejects_bad_server() {
        assert!(matches!(
            ClientConfig::new("", 5.0),
            Err(ConfigError::InvalidServer(_))
        ));
        assert!(matches!(
            ClientConfig::new("ftp://okex.com", 5.0),
            Err(ConfigError::InvalidServer(_))
        ));
    }

    #[test]
    fn test_new_rejects_bad_timeout() {
        for timeout in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                ClientConfig::new("https://www.okex.com", timeout),
                Err(ConfigError::InvalidTimeout(_))
            ));
        }
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.timeout(), Duration::from_secs_f64(9.5));
    }

    #[test]
    fn test_from_lookup_environment_and_override() {
        let config = ClientConfig::from_lookup(lookup(&[("OKEX_ENVIRONMENT", "aws")])).unwrap();
        assert_eq!(config.api_server(), "https://aws.okex.com");

        let config = ClientConfig::from_lookup(lookup(&[
            ("OKEX_ENVIRONMENT", "aws"),
            ("OKEX_API_SERVER", "http://localhost:8080"),
            ("OKEX_TIMEOUT_SECS", "2.5"),
        ]))
        .unwrap();
        assert_eq!(config.api_server(), "http://localhost:8080");
        assert_eq!(config.timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn test_from_lookup_bad_timeout() {
        let result = ClientConfig::from_lookup(lookup(&[("OKEX_TIMEOUT_SECS", "soon")]));
        assert_eq!(result, Err(ConfigError::InvalidTimeout("soon".into())));
    }
}
