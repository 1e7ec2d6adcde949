//! Downstream caller - issues the GET to each resolved service endpoint

use std::time::Duration;

use async_trait::async_trait;
use fanout_core::{AggregateResult, ResolvedEndpoint, ServiceCaller};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{ClientError, Result};
use crate::registry::check_status;

/// HTTP implementation of [`ServiceCaller`].
///
/// Holds a single reqwest client so the connection pool is shared by every
/// call. No per-request state lives here, so one caller can serve any
/// number of concurrent aggregations.
#[derive(Debug, Clone)]
pub struct HttpServiceCaller {
    client: Client,
}

impl HttpServiceCaller {
    /// Create a caller with no per-call timeout.
    ///
    /// A downstream service that never answers stalls the aggregation.
    pub fn new() -> Result<Self> {
        Self::with_timeout(None)
    }

    /// Create a caller that gives up on each call after `timeout`
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self::with_client(builder.build()?))
    }

    /// Wrap an existing reqwest client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// GET `endpoint` and decode the response body as JSON
    #[instrument(skip_all, fields(endpoint = %endpoint))]
    pub async fn get_json(&self, endpoint: &ResolvedEndpoint) -> Result<Value> {
        let response = self.client.get(endpoint.as_str()).send().await?;
        let response = check_status(response).await?;

        let body = response.bytes().await?;
        let value = serde_json::from_slice(&body)
            .map_err(|e| ClientError::ParseError(format!("response body: {}", e)))?;

        debug!(bytes = body.len(), "Decoded downstream response");
        Ok(value)
    }
}

#[async_trait]
impl ServiceCaller for HttpServiceCaller {
    async fn call(&self, service: &str, endpoint: &ResolvedEndpoint) -> AggregateResult<Value> {
        self.get_json(endpoint)
            .await
            .map_err(|e| e.into_downstream_error(service))
    }
}
