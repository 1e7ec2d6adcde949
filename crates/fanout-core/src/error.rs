//! Common error types for aggregation

use thiserror::Error;

/// Result type for aggregation operations
pub type AggregateResult<T> = Result<T, AggregateError>;

/// Errors that can occur while resolving and calling services
#[derive(Debug, Error)]
pub enum AggregateError {
    /// The registry could not be reached or refused to serve the route list
    #[error("Registry unavailable: {0}")]
    RegistryUnavailable(String),

    /// The registry answered, but not with a `{ "data": [...] }` route list
    #[error("Registry response malformed: {0}")]
    RegistryMalformed(String),

    /// Descriptor has no url and no usable protocol/host pair
    #[error("Service '{0}' cannot be resolved to an endpoint")]
    UnresolvableService(String),

    /// Network error, non-2xx status, or undecodable body from a selected service
    #[error("Call to service '{service}' failed: {reason}")]
    DownstreamCallFailed {
        /// Name of the service as registered
        service: String,
        /// Human-readable failure reason
        reason: String,
    },
}

impl AggregateError {
    /// Shorthand for a downstream failure
    pub fn downstream(service: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DownstreamCallFailed {
            service: service.into(),
            reason: reason.into(),
        }
    }

    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AggregateError::RegistryUnavailable(_) => 503,
            AggregateError::RegistryMalformed(_) => 502,
            AggregateError::UnresolvableService(_) => 502,
            AggregateError::DownstreamCallFailed { .. } => 502,
        }
    }
}
