//! TOML configuration for the fanout daemon
//!
//! Every section is optional. Values from the file are overridden by
//! environment variables and command-line flags (see [`Overrides`]).

use std::path::Path;
use std::time::Duration;

use fanout_client::DEFAULT_REGISTRY_URL;
use serde::Deserialize;

/// Listening socket
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3333,
        }
    }
}

/// Registry admin API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RegistryConfig {
    /// Base URL; `routes` is appended to it
    pub url: String,
    /// Whole-request timeout for the route list fetch
    pub timeout_ms: Option<u64>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_REGISTRY_URL.to_string(),
            timeout_ms: None,
        }
    }
}

/// Calls to the aggregated services
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DownstreamConfig {
    /// Per-call timeout. Absent means a hung service stalls the request.
    pub timeout_ms: Option<u64>,
}

/// Top-level daemon configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub registry: RegistryConfig,
    pub downstream: DownstreamConfig,
}

/// Values supplied by flags or environment; `None` keeps the file/default value
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub registry_url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub call_timeout_ms: Option<u64>,
}

impl GatewayConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;
        Self::from_toml(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Apply flag/environment values on top of the loaded configuration
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(url) = overrides.registry_url {
            self.registry.url = url;
        }
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(ms) = overrides.call_timeout_ms {
            self.downstream.timeout_ms = Some(ms);
        }
    }

    pub fn registry_timeout(&self) -> Option<Duration> {
        self.registry.timeout_ms.map(Duration::from_millis)
    }

    pub fn call_timeout(&self) -> Option<Duration> {
        self.downstream.timeout_ms.map(Duration::from_millis)
    }
}
