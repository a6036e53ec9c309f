//! Common types and utilities for taskcluster-cli
//!
//! This crate contains the shared data model (manifest, reference documents,
//! endpoint maps, health responses), the error taxonomy and the settings
//! used across the client, status, generator and CLI components.

mod config;
mod model;

pub use config::{
    default_cache_path, default_config_path, ReportMode, Settings, DEFAULT_MANIFEST_URL,
};
pub use model::{
    ApiEntry, EndpointMap, HealthStatus, Manifest, SchemaSet, ServiceMap, ServiceReference,
    PING_ENTRY_NAME,
};

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while fetching, caching, polling or generating
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Network error fetching {url}: {message}")]
    Network { url: String, message: String },

    #[error("Bad (!= 200) status code {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Parse error in {context}: {message}")]
    Parse { context: String, message: String },

    #[error("Unknown service: {0}")]
    UnknownService(String),

    #[error("Cannot read cache file {}: {message}", .path.display())]
    CacheRead { path: PathBuf, message: String },

    #[error("Timed out after {after:?} while {what}")]
    Timeout { what: String, after: Duration },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Whether the error came out of a network fetch (transport, HTTP status,
    /// body shape or deadline).
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            CliError::Network { .. }
                | CliError::Status { .. }
                | CliError::Parse { .. }
                | CliError::Timeout { .. }
        )
    }
}

/// Result type for taskcluster-cli operations
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_classification() {
        let status = CliError::Status {
            url: "https://queue.example.com/ping".to_string(),
            status: 503,
        };
        assert!(status.is_fetch_error());
        assert!(!CliError::UnknownService("queue".to_string()).is_fetch_error());
    }

    #[test]
    fn test_status_error_message() {
        let err = CliError::Status {
            url: "https://ref.example/queue".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "Bad (!= 200) status code 404 from https://ref.example/queue"
        );
    }
}
