//! Application state for the fanout API

use std::sync::Arc;

use fanout_gateway::Aggregator;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Aggregation engine; stateless per request, so sharing it is safe
    aggregator: Arc<Aggregator>,
}

impl AppState {
    /// Create a new AppState around an aggregator
    pub fn new(aggregator: Aggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }

    /// Get the aggregator
    pub fn aggregator(&self) -> &Aggregator {
        &self.aggregator
    }
}
