//! Generic REST client infrastructure.
//!
//! This crate provides a thin wrapper around `reqwest` with:
//!
//! - Consistent error handling via `RestError`, carrying the endpoint,
//!   status and a truncated body
//! - GET and POST with caller-supplied headers
//! - JSON response deserialization
//!
//! # Example
//!
//! ```rust,ignore
//! use rest_client::RestClient;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct TimeResponse {
//!     iso: String,
//! }
//!
//! let client = RestClient::new("https://www.okex.com", Duration::from_secs(10))?;
//! let time: TimeResponse = client.get("/api/general/v3/time", &[]).await?;
//! ```

mod client;
mod error;

pub use client::RestClient;
pub use error::RestError;
