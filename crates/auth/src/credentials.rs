//! Secure API credential management.
//!
//! Uses the `secrecy` crate to prevent accidental logging of the secret key
//! and passphrase, and ensures memory is zeroed on drop.

use crate::error::AuthError;
use secrecy::{ExposeSecret, SecretString};

/// API credentials for authenticated OKEx requests.
///
/// OKEx requires a passphrase chosen at key creation time alongside the
/// key pair. Both the secret key and the passphrase are wrapped in
/// `SecretString`, which:
/// - Prevents accidental Debug/Display printing
/// - Zeros memory on drop via zeroize
#[derive(Clone)]
pub struct ApiCredentials {
    api_key: String,
    secret_key: SecretString,
    passphrase: SecretString,
}

impl ApiCredentials {
    /// Load credentials from environment variables.
    ///
    /// Looks for:
    /// - `OKEX_API_KEY` - The API key (public)
    /// - `OKEX_SECRET_KEY` - The secret key (private)
    /// - `OKEX_PASSPHRASE` - The passphrase (private)
    ///
    /// # Errors
    /// Returns `AuthError::MissingEnvVar` if any variable is not set.
    pub fn from_env() -> Result<Self, AuthError> {
        // Load .env file if present (ignores errors if file doesn't exist)
        dotenvy::dotenv().ok();

        let api_key = read_env("OKEX_API_KEY")?;
        let secret_key = read_env("OKEX_SECRET_KEY")?;
        let passphrase = read_env("OKEX_PASSPHRASE")?;

        Ok(Self::new(api_key, secret_key, passphrase))
    }

    /// Create credentials from explicit values.
    pub fn new(api_key: String, secret_key: String, passphrase: String) -> Self {
        Self {
            api_key,
            secret_key: SecretString::from(secret_key),
            passphrase: SecretString::from(passphrase),
        }
    }

    /// Get the API key (public, safe to log).
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Expose the secret key for signing.
    ///
    /// **WARNING**: Only use this for cryptographic operations.
    /// Never log or display the return value.
    pub fn expose_secret(&self) -> &str {
        self.secret_key.expose_secret()
    }

    /// Expose the passphrase for the `OK-ACCESS-PASSPHRASE` header.
    pub fn expose_passphrase(&self) -> &str {
        self.passphrase.expose_secret()
    }
}

fn read_env(name: &str) -> Result<String, AuthError> {
    std::env::var(name).map_err(|_| AuthError::MissingEnvVar(name.into()))
}

impl std::fmt::Debug for ApiCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiCredentials")
            .field("api_key", &self.api_key)
            .field("secret_key", &"[REDACTED]")
            .field("passphrase", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_new() {
        let creds = ApiCredentials::new("my_api_key".into(), "my_secret".into(), "my_pass".into());
        assert_eq!(creds.api_key(), "my_api_key");
        assert_eq!(creds.expose_secret(), "my_secret");
        assert_eq!(creds.expose_passphrase(), "my_pass");
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let creds = ApiCredentials::new(
            "my_api_key".into(),
            "super_secret_key".into(),
            "hunter2".into(),
        );
        let debug_str = format!("{:?}", creds);

        assert!(debug_str.contains("my_api_key"));
        assert!(!debug_str.contains("super_secret_key"));
        assert!(!debug_str.contains("hunter2"));
        assert!(debug_str.contains("[REDACTED]"));
    }
}
