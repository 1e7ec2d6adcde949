//! Endpoint resolution for registry descriptors.
//!
//! Purely syntactic: nothing here touches the network, and the same
//! descriptor always resolves to the same endpoint.

use crate::error::{AggregateError, AggregateResult};
use crate::models::{ResolvedEndpoint, ServiceDescriptor};

/// Compute the base URL to call for a descriptor.
///
/// An explicit, non-empty `url` is returned unchanged. Otherwise the
/// endpoint is `<protocols[0]>://<hosts[0]><path>`.
///
/// ```
/// # use fanout_core::{resolve, ServiceDescriptor};
/// let desc = ServiceDescriptor::with_route("users", "https", "h.example", "/p");
/// assert_eq!(resolve(&desc).unwrap().as_str(), "https://h.example/p");
/// ```
pub fn resolve(descriptor: &ServiceDescriptor) -> AggregateResult<ResolvedEndpoint> {
    if let Some(url) = descriptor.explicit_url() {
        return Ok(ResolvedEndpoint::new(url));
    }

    let (Some(protocol), Some(host)) = (descriptor.protocols.first(), descriptor.hosts.first())
    else {
        return Err(AggregateError::UnresolvableService(descriptor.name.clone()));
    };

    Ok(ResolvedEndpoint::new(format!(
        "{}://{}{}",
        protocol, host, descriptor.path
    )))
}
