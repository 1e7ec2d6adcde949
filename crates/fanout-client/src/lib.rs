//! fanout-client - HTTP clients for the aggregation gateway
//!
//! Provides the reqwest-backed implementations of the core traits:
//! [`RegistryClient`] reads the route list from the registry admin API and
//! [`HttpServiceCaller`] performs the per-service GET.
//!
//! # Example
//!
//! ```rust,no_run
//! use fanout_client::{HttpServiceCaller, RegistryClient};
//!
//! #[tokio::main]
//! async fn main() -> fanout_client::Result<()> {
//!     let registry = RegistryClient::new("http://localhost:8001/")?;
//!     let routes = registry.fetch_routes().await?;
//!
//!     let caller = HttpServiceCaller::new()?;
//!     for route in &routes {
//!         if let Ok(endpoint) = fanout_core::resolve(route) {
//!             let body = caller.get_json(&endpoint).await?;
//!             println!("{}: {}", route.name, body);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

mod caller;
mod error;
mod registry;
pub mod testing;

pub use caller::HttpServiceCaller;
pub use error::{ClientError, Result};
pub use registry::{RegistryClient, DEFAULT_REGISTRY_URL};
