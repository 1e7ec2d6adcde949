//! HTTP request handlers

pub mod aggregate;

/// GET /healthcheck
pub async fn healthcheck() -> &'static str {
    "OK"
}
