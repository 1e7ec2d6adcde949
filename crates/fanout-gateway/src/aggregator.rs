//! Aggregator - fans one request out to the selected services and merges the bodies
//!
//! Selection always fetches a fresh registry list. Execution is either
//! sequential (registry order, first failure aborts everything) or
//! parallel (all calls in flight at once, failures dropped from the
//! result). The two failure policies differ on purpose and are both part
//! of the public contract.

use std::sync::Arc;

use fanout_core::{
    resolve, AggregateResult, AggregationMode, AggregationResult, RequestedServiceList,
    ServiceCaller, ServiceDescriptor, ServiceRegistry,
};
use futures::future::join_all;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

/// Aggregation engine over a registry and a downstream caller
///
/// Holds no per-request state: every call to [`Aggregator::aggregate`]
/// performs its own registry fetch and builds its own result, so one
/// aggregator can be shared across concurrent requests.
#[derive(Clone)]
pub struct Aggregator {
    /// Where the route list comes from
    registry: Arc<dyn ServiceRegistry>,
    /// How each selected service is called
    caller: Arc<dyn ServiceCaller>,
}

impl Aggregator {
    /// Create an aggregator from its two collaborators
    pub fn new(registry: Arc<dyn ServiceRegistry>, caller: Arc<dyn ServiceCaller>) -> Self {
        Self { registry, caller }
    }

    /// Call every requested service that the registry currently knows and
    /// merge the decoded bodies by service name.
    ///
    /// Registry failures abort in both modes. In sequential mode any
    /// resolution or call failure aborts too; in parallel mode the failed
    /// service is just left out of the result.
    #[instrument(skip_all, fields(mode = %mode, requested = requested.len()))]
    pub async fn aggregate(
        &self,
        requested: &RequestedServiceList,
        mode: AggregationMode,
    ) -> AggregateResult<AggregationResult> {
        let selected = self.select(requested).await?;

        let result = match mode {
            AggregationMode::Sequential => self.run_sequential(&selected).await?,
            AggregationMode::Parallel => self.run_parallel(&selected).await,
        };

        info!(
            selected = selected.len(),
            returned = result.len(),
            "Aggregation complete"
        );
        Ok(result)
    }

    /// Fail-fast aggregation
    pub async fn sequential(
        &self,
        requested: &RequestedServiceList,
    ) -> AggregateResult<AggregationResult> {
        self.aggregate(requested, AggregationMode::Sequential).await
    }

    /// Best-effort aggregation
    pub async fn parallel(
        &self,
        requested: &RequestedServiceList,
    ) -> AggregateResult<AggregationResult> {
        self.aggregate(requested, AggregationMode::Parallel).await
    }

    /// Registry services whose name was requested, in registry order.
    ///
    /// Requested names the registry does not know are dropped without error.
    pub async fn select(
        &self,
        requested: &RequestedServiceList,
    ) -> AggregateResult<Vec<ServiceDescriptor>> {
        let services = self.registry.list_services().await?;
        let registered = services.len();

        let selected: Vec<ServiceDescriptor> = services
            .into_iter()
            .filter(|service| requested.contains(&service.name))
            .collect();

        for name in requested.names() {
            if !selected.iter().any(|s| &s.name == name) {
                debug!(service = %name, "Requested service not in registry, skipping");
            }
        }

        debug!(
            registered,
            selected = selected.len(),
            "Selected services from registry"
        );
        Ok(selected)
    }

    /// Resolve one descriptor and call it
    async fn call_service(&self, service: &ServiceDescriptor) -> AggregateResult<Value> {
        let endpoint = resolve(service)?;
        debug!(service = %service.name, endpoint = %endpoint, "Calling service");
        self.caller.call(&service.name, &endpoint).await
    }

    /// One call at a time; the next starts only after the previous finished
    async fn run_sequential(
        &self,
        services: &[ServiceDescriptor],
    ) -> AggregateResult<AggregationResult> {
        let mut result = AggregationResult::new();

        for service in services {
            match self.call_service(service).await {
                Ok(body) => {
                    result.insert(service.name.clone(), body);
                }
                Err(e) => {
                    warn!(service = %service.name, error = %e, "Sequential aggregation aborted");
                    return Err(e);
                }
            }
        }

        Ok(result)
    }

    /// All calls concurrently, joined before the result is built
    async fn run_parallel(&self, services: &[ServiceDescriptor]) -> AggregationResult {
        let calls = services
            .iter()
            .map(|service| async move { (service, self.call_service(service).await) });

        // Every branch is terminal once join_all returns
        let outcomes = join_all(calls).await;

        let mut result = AggregationResult::new();
        for (service, outcome) in outcomes {
            match outcome {
                Ok(body) => {
                    result.insert(service.name.clone(), body);
                }
                Err(e) => {
                    warn!(service = %service.name, error = %e, "Omitting failed service from result");
                }
            }
        }

        result
    }
}
