//! fanout-gateway - Registry-backed request aggregation
//!
//! This crate provides the [`Aggregator`], which turns one incoming request
//! naming several services into one JSON document keyed by service name.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                         Aggregator                             │
//! │                                                                │
//! │  requested names ──► ServiceRegistry::list_services()          │
//! │                        │  (fresh fetch, registry order)        │
//! │                        ▼                                       │
//! │                   selection (∩ requested)                      │
//! │                        │                                       │
//! │          ┌─────────────┴──────────────┐                        │
//! │          ▼                            ▼                        │
//! │   sequential                     parallel                      │
//! │   resolve → call → store         resolve → call (all at once)  │
//! │   first failure aborts           join all, drop failures       │
//! │          │                            │                        │
//! │          └─────────────┬──────────────┘                        │
//! │                        ▼                                       │
//! │               AggregationResult { name: body }                 │
//! └────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! use fanout_client::{HttpServiceCaller, RegistryClient};
//! use fanout_gateway::Aggregator;
//!
//! let registry = Arc::new(RegistryClient::new("http://localhost:8001/")?);
//! let caller = Arc::new(HttpServiceCaller::new()?);
//! let aggregator = Aggregator::new(registry, caller);
//!
//! let requested = RequestedServiceList::parse("users,orders");
//! let result = aggregator.parallel(&requested).await?;
//! ```

mod aggregator;

pub use aggregator::Aggregator;

// Re-export core types for convenience
pub use fanout_core::{
    AggregateError, AggregateResult, AggregationMode, AggregationResult, RequestedServiceList,
    ServiceCaller, ServiceRegistry,
};
