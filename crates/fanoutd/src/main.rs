//! fanoutd - fanout Server Daemon
//!
//! Aggregation gateway: resolves requested service names through the
//! registry admin API, calls them, and returns one JSON object keyed by
//! service name.
//!
//! Usage:
//!   fanoutd [OPTIONS] [config.toml]
//!
//! Without a config file, built-in defaults are used (registry at
//! http://localhost:8001/, listening on 0.0.0.0:3333).

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use fanout_api::{create_router, AppState};
use fanout_client::{HttpServiceCaller, RegistryClient};
use fanout_gateway::Aggregator;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{GatewayConfig, Overrides};

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "fanoutd", version, about = "fanout aggregation gateway daemon")]
struct Args {
    /// Server config file (TOML)
    config: Option<PathBuf>,

    /// Registry admin base URL
    #[arg(long, env = "KONG_ADMIN_URL")]
    registry_url: Option<String>,

    /// Address to listen on
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    port: Option<u16>,

    /// Per-call timeout for aggregated services, in milliseconds
    #[arg(long)]
    call_timeout_ms: Option<u64>,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            registry_url: self.registry_url.clone(),
            host: self.host.clone(),
            port: self.port,
            call_timeout_ms: self.call_timeout_ms,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "fanoutd=info,fanout_api=info,fanout_gateway=info,fanout_client=info,tower_http=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting fanoutd (aggregation gateway)");

    let args = Args::parse();

    let mut config = match args.config {
        Some(ref path) => {
            tracing::info!("Loading config from: {}", path.display());
            GatewayConfig::load(path).map_err(anyhow::Error::msg)?
        }
        None => {
            tracing::info!("No config file provided, using defaults");
            GatewayConfig::default()
        }
    };
    config.apply(args.overrides());

    tracing::info!(
        registry = %config.registry.url,
        call_timeout_ms = ?config.downstream.timeout_ms,
        "Resolved configuration"
    );

    let registry = RegistryClient::with_timeout(&config.registry.url, config.registry_timeout())
        .with_context(|| format!("Invalid registry URL '{}'", config.registry.url))?;
    let caller = HttpServiceCaller::with_timeout(config.call_timeout())
        .context("Failed to build downstream HTTP client")?;

    let aggregator = Aggregator::new(Arc::new(registry), Arc::new(caller));
    let app = create_router(AppState::new(aggregator));

    let listener = tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port))
        .await
        .with_context(|| {
            format!(
                "Failed to bind {}:{}",
                config.server.host, config.server.port
            )
        })?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("fanoutd stopped");
    Ok(())
}

/// Resolves on Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
