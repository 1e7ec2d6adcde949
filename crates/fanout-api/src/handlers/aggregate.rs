//! Aggregation handlers

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use fanout_core::{AggregationMode, AggregationResult, RequestedServiceList};

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the requested service names
pub const SERVICE_LIST_HEADER: &str = "service-list";

/// POST /sequence
///
/// Calls the requested services one by one in registry order. Any failure
/// fails the whole request; no partial body is returned.
pub async fn sequence(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AggregationResult>, ApiError> {
    aggregate(&state, &headers, AggregationMode::Sequential).await
}

/// POST /parallel
///
/// Calls the requested services concurrently and returns whatever
/// succeeded. Only a registry failure produces an error status.
pub async fn parallel(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<AggregationResult>, ApiError> {
    aggregate(&state, &headers, AggregationMode::Parallel).await
}

async fn aggregate(
    state: &AppState,
    headers: &HeaderMap,
    mode: AggregationMode,
) -> Result<Json<AggregationResult>, ApiError> {
    let requested = requested_services(headers)?;
    tracing::debug!(%mode, services = ?requested.names(), "Aggregation request");

    let result = state.aggregator().aggregate(&requested, mode).await?;
    Ok(Json(result))
}

/// Read and parse the `service-list` header
pub fn requested_services(headers: &HeaderMap) -> Result<RequestedServiceList, ApiError> {
    let value = headers.get(SERVICE_LIST_HEADER).ok_or_else(|| {
        ApiError::BadRequest(format!("Missing '{}' header", SERVICE_LIST_HEADER))
    })?;

    let value = value.to_str().map_err(|_| {
        ApiError::BadRequest(format!("'{}' header is not valid text", SERVICE_LIST_HEADER))
    })?;

    Ok(RequestedServiceList::parse(value))
}
