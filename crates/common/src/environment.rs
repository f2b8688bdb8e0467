//! OKEx environment configuration.
//!
//! Selects the REST endpoint the client talks to.

use std::fmt;
use std::str::FromStr;

/// OKEx deployment to connect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OkexEnvironment {
    /// Main site.
    #[default]
    Production,
    /// AWS-hosted mirror of the main site (lower latency from AWS regions).
    Aws,
}

impl OkexEnvironment {
    /// REST API base URL.
    pub fn rest_base_url(&self) -> &'static str {
        match self {
            Self::Production => "https://www.okex.com",
            Self::Aws => "https://aws.okex.com",
        }
    }
}

impl fmt::Display for OkexEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Aws => write!(f, "aws"),
        }
    }
}

impl FromStr for OkexEnvironment {
    type Err = ParseEnvironmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" | "main" => Ok(Self::Production),
            "aws" => Ok(Self::Aws),
            _ => Err(ParseEnvironmentError(s.to_string())),
        }
    }
}

/// Error parsing environment string.
#[derive(Debug, Clone)]
pub struct ParseEnvironmentError(String);

impl fmt::Display for ParseEnvironmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid environment '{}', expected 'production' or 'aws'",
            self.0
        )
    }
}

impl std::error::Error for ParseEnvironmentError {}
