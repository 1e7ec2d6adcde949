//! Data types shared by the registry client, the engine and the HTTP layer

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Service Descriptor
// =============================================================================

/// A registry route describing how to reach one logical service.
///
/// Fields the registry reports as `null` (unset hosts on a url-only route,
/// for example) deserialize to their empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    /// Logical service name, matched against the caller's requested list.
    /// Empty for unnamed routes.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Explicit endpoint; takes precedence over protocols/hosts/path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Allowed protocols, preferred first
    #[serde(default, deserialize_with = "null_as_default")]
    pub protocols: Vec<String>,
    /// Hostnames, preferred first
    #[serde(default, deserialize_with = "null_as_default")]
    pub hosts: Vec<String>,
    /// Path appended to the host
    #[serde(default, deserialize_with = "null_as_default")]
    pub path: String,
}

impl ServiceDescriptor {
    /// Descriptor with an explicit URL
    pub fn with_url(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: Some(url.into()),
            protocols: Vec::new(),
            hosts: Vec::new(),
            path: String::new(),
        }
    }

    /// Descriptor that resolves from a single protocol/host/path triple
    pub fn with_route(
        name: impl Into<String>,
        protocol: impl Into<String>,
        host: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: None,
            protocols: vec![protocol.into()],
            hosts: vec![host.into()],
            path: path.into(),
        }
    }

    /// Whether the registry gave this route a name
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    /// The explicit URL, if set and non-empty
    pub fn explicit_url(&self) -> Option<&str> {
        self.url.as_deref().filter(|u| !u.is_empty())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Registry `GET /routes` response body
#[derive(Debug, Clone, Deserialize)]
pub struct RouteList {
    /// Routes in registry order
    pub data: Vec<ServiceDescriptor>,
}

// =============================================================================
// Requested Service List
// =============================================================================

/// Service names a caller asked for, in the order given.
///
/// Duplicates are kept; they are harmless because selection only checks
/// membership.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestedServiceList(Vec<String>);

impl RequestedServiceList {
    /// Build from already-split names
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(names.into_iter().map(Into::into).collect())
    }

    /// Parse a delimited header value.
    ///
    /// Accepts `a,b,c`, `[a, b, c]` and `["a", "b"]`. Whitespace around
    /// names is trimmed and empty items are dropped.
    ///
    /// ```
    /// # use fanout_core::RequestedServiceList;
    /// let list = RequestedServiceList::parse("[users, \"orders\" ,]");
    /// assert_eq!(list.names(), ["users", "orders"]);
    /// ```
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        let inner = trimmed
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .unwrap_or(trimmed);

        Self(
            inner
                .split(',')
                .map(|item| item.trim().trim_matches(|c| c == '"' || c == '\'').trim())
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    /// Whether `name` was requested
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    /// Requested names in caller order
    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// =============================================================================
// Resolved Endpoint
// =============================================================================

/// Absolute URL computed from a [`ServiceDescriptor`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedEndpoint(String);

impl ResolvedEndpoint {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ResolvedEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Aggregation
// =============================================================================

/// Fan-out strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    /// One call at a time in registry order; first failure aborts
    Sequential,
    /// All calls concurrently; failures are omitted
    Parallel,
}

impl fmt::Display for AggregationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregationMode::Sequential => f.write_str("sequential"),
            AggregationMode::Parallel => f.write_str("parallel"),
        }
    }
}

/// Decoded response bodies keyed by service name.
///
/// Serializes as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregationResult {
    entries: Map<String, Value>,
}

impl AggregationResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a body, replacing any earlier body for the same name
    pub fn insert(&mut self, name: impl Into<String>, body: Value) -> Option<Value> {
        self.entries.insert(name.into(), body)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Service names present in the result
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.entries
    }
}
