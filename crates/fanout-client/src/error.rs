//! Error types for registry and downstream client operations

use fanout_core::AggregateError;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Server returned a non-success status
    #[error("Server error {status}: {message}")]
    ServerError { status: u16, message: String },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

impl ClientError {
    /// Create a server error from status code and message
    pub fn server_error(status: u16, message: impl Into<String>) -> Self {
        Self::ServerError {
            status,
            message: message.into(),
        }
    }

    /// Map a failure talking to the registry onto the aggregation error kinds.
    ///
    /// Anything that prevented a response from being served counts as
    /// unavailable; a served response that does not parse is malformed.
    pub fn into_registry_error(self) -> AggregateError {
        match self {
            ClientError::ParseError(msg) => AggregateError::RegistryMalformed(msg),
            other => AggregateError::RegistryUnavailable(other.to_string()),
        }
    }

    /// Map a failure calling `service` onto `DownstreamCallFailed`
    pub fn into_downstream_error(self, service: &str) -> AggregateError {
        AggregateError::downstream(service, self.to_string())
    }
}
