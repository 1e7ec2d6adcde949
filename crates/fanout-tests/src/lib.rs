//! End-to-end tests for the fanout gateway
//!
//! This crate contains tests that exercise the full stack over real
//! sockets:
//! - stub registry serving `GET /routes`
//! - stub downstream services with scripted delays and failures
//! - the gateway router backed by the reqwest registry client and caller
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fanout-tests
//! ```
//!
//! # Test Structure
//!
//! - `aggregate_e2e_test.rs` - ordering, fail-fast, best-effort and fan-in
//! - `isolation_test.rs` - concurrent aggregation requests

// This crate only contains tests, no library code
