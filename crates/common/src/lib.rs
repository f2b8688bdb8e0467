//! Shared configuration and process setup.

mod config;
mod environment;

pub use config::{ClientConfig, ConfigError, DEFAULT_TIMEOUT_SECS};
pub use environment::{OkexEnvironment, ParseEnvironmentError};

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber for binaries.
///
/// Honours `RUST_LOG`, defaulting to `info`. Libraries must not call this.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
