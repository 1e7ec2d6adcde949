//! Registry client - fetches the current route list from the registry admin API

use std::time::Duration;

use async_trait::async_trait;
use fanout_core::{AggregateResult, RouteList, ServiceDescriptor, ServiceRegistry};
use reqwest::{Client, Response};
use tracing::{debug, instrument};
use url::Url;

use crate::error::{ClientError, Result};

/// Default registry admin endpoint
pub const DEFAULT_REGISTRY_URL: &str = "http://localhost:8001/";

/// Default connection timeout
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Longest error body carried into an error message, in bytes
const MAX_ERROR_BODY: usize = 256;

/// Client for the registry's `GET /routes` endpoint
#[derive(Debug, Clone)]
pub struct RegistryClient {
    client: Client,
    routes_url: Url,
}

impl RegistryClient {
    /// Create a registry client without a request timeout
    ///
    /// # Arguments
    /// * `base_url` - Registry admin base URL (e.g., "http://localhost:8001/")
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, None)
    }

    /// Create a registry client with an optional whole-request timeout
    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().connect_timeout(DEFAULT_CONNECT_TIMEOUT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Self::with_client(builder.build()?, base_url)
    }

    /// Create a registry client reusing an existing reqwest client
    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        let routes_url = routes_url(base_url)?;
        Ok(Self { client, routes_url })
    }

    /// The fully-resolved routes URL
    pub fn routes_url(&self) -> &Url {
        &self.routes_url
    }

    /// Fetch all registered routes in registry order.
    ///
    /// Always hits the registry; nothing is cached between calls.
    #[instrument(skip(self), fields(url = %self.routes_url))]
    pub async fn fetch_routes(&self) -> Result<Vec<ServiceDescriptor>> {
        let response = self.client.get(self.routes_url.clone()).send().await?;
        let response = check_status(response).await?;

        let body = response.bytes().await?;
        let routes: RouteList = serde_json::from_slice(&body)
            .map_err(|e| ClientError::ParseError(format!("route list: {}", e)))?;

        let total = routes.data.len();
        let named: Vec<ServiceDescriptor> =
            routes.data.into_iter().filter(|r| r.is_named()).collect();

        debug!(
            count = named.len(),
            unnamed = total - named.len(),
            "Fetched routes from registry"
        );
        Ok(named)
    }
}

#[async_trait]
impl ServiceRegistry for RegistryClient {
    async fn list_services(&self) -> AggregateResult<Vec<ServiceDescriptor>> {
        self.fetch_routes()
            .await
            .map_err(ClientError::into_registry_error)
    }
}

/// Append `routes` to the base URL's path, keeping any path prefix.
///
/// `Url::join` replaces the last path segment unless the path ends in `/`,
/// so the slash is added first.
fn routes_url(base_url: &str) -> Result<Url> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join("routes")?)
}

/// Turn a non-success response into a `ServerError`
pub(crate) async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let reason = status.canonical_reason().unwrap_or("unknown");
    let message = match response.text().await {
        Ok(body) if !body.trim().is_empty() => truncate_body(body.trim(), MAX_ERROR_BODY),
        _ => reason.to_string(),
    };
    Err(ClientError::server_error(status.as_u16(), message))
}

/// Cut `body` to at most `max` bytes on a char boundary, marking the cut
fn truncate_body(body: &str, max: usize) -> String {
    if body.len() <= max {
        return body.to_string();
    }
    let mut end = max;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
