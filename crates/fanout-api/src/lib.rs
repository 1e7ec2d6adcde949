//! fanout-api - REST API layer for the aggregation gateway
//!
//! This crate exposes the [`Aggregator`](fanout_gateway::Aggregator) over
//! HTTP. Callers name the services they want in the `service-list` header
//! and get back one JSON object keyed by service name.
//!
//! # Usage
//!
//! ```ignore
//! use fanout_api::{create_router, AppState};
//!
//! let state = AppState::new(aggregator);
//! let router = create_router(state);
//! axum::serve(listener, router).await?;
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use handlers::aggregate::SERVICE_LIST_HEADER;
pub use state::AppState;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the fanout REST API router with the given application state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/healthcheck", get(handlers::healthcheck))
        // Aggregation routes
        .route("/sequence", post(handlers::aggregate::sequence))
        .route("/parallel", post(handlers::aggregate::parallel))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
