//! Registry and downstream-call traits - the seams between the engine and the network

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AggregateResult;
use crate::models::{ResolvedEndpoint, ServiceDescriptor};

/// Source of the current set of routable services.
///
/// Implementations fetch a fresh list on every call; registry membership
/// can change between requests.
#[async_trait]
pub trait ServiceRegistry: Send + Sync {
    /// List all registered services in registry order.
    ///
    /// Fails only with `RegistryUnavailable` or `RegistryMalformed`.
    async fn list_services(&self) -> AggregateResult<Vec<ServiceDescriptor>>;
}

/// Issues the request to one resolved service endpoint.
#[async_trait]
pub trait ServiceCaller: Send + Sync {
    /// GET the endpoint and decode the body as JSON.
    ///
    /// Transport errors, non-2xx statuses and undecodable bodies fail with
    /// `DownstreamCallFailed` naming `service`.
    async fn call(&self, service: &str, endpoint: &ResolvedEndpoint) -> AggregateResult<Value>;
}
