//! Authentication and signing for the OKEx v3 API.
//!
//! This crate provides secure credential management and request signing
//! for authenticated API calls.
//!
//! # Features
//!
//! - **Secure Credentials**: the secret key and passphrase are wrapped in
//!   `SecretString` to prevent accidental logging and ensure memory is zeroed on drop.
//! - **HMAC-SHA256 Signing**: `base64(HMAC-SHA256(secret, timestamp + METHOD + path + body))`.
//! - **Environment Loading**: Credentials can be loaded from environment variables
//!   or a `.env` file.
//!
//! # Example
//!
//! ```rust,ignore
//! use auth::{ApiCredentials, RequestSigner};
//!
//! let credentials = ApiCredentials::from_env()?;
//! let signer = RequestSigner::new(&credentials);
//!
//! let headers = signer.auth_headers(&server_iso_time, "GET", "/api/spot/v3/accounts", "");
//! ```

mod credentials;
mod error;
mod signer;

pub use credentials::ApiCredentials;
pub use error::AuthError;
pub use signer::{
    RequestSigner, HEADER_ACCESS_KEY, HEADER_ACCESS_PASSPHRASE, HEADER_ACCESS_SIGN,
    HEADER_ACCESS_TIMESTAMP,
};
