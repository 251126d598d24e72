//! Error types for the APIC client

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur when talking to the controller
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Request timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Host name could not be resolved to an address
    #[error("could not resolve host '{host}': {message}")]
    Resolve {
        /// Host name as given
        host: String,
        /// Resolver error
        message: String,
    },
}

/// Result type for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
