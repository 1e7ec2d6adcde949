//! fanout-core - Core traits and types for the fanout aggregation gateway
//!
//! This crate provides the data model, the error type, endpoint resolution
//! and the two traits (`ServiceRegistry`, `ServiceCaller`) that let the
//! aggregation engine run against real HTTP clients or in-memory fakes.

pub mod error;
pub mod models;
pub mod resolver;
pub mod service;

pub use error::{AggregateError, AggregateResult};
pub use models::*;
pub use resolver::resolve;
pub use service::{ServiceCaller, ServiceRegistry};
