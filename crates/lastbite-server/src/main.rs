//! # Last Bite Server
//!
//! The main entry point for the marketplace backend.
//!
//! ## Startup Sequence
//!
//! 1. Initialize tracing (env-filter, `RUST_LOG` aware)
//! 2. Load configuration from environment
//! 3. Create the store and hand it to the gateway
//! 4. Serve until ctrl-c, then drain gracefully

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use lastbite_gateway::{GatewayConfig, GatewayService};
use lastbite_ledger::InMemoryStore;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("===========================================");
    info!("  Last Bite Rescue API v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let config = GatewayConfig::from_env().context("Failed to load configuration")?;
    info!("HTTP bind address: {}", config.http_addr());

    let store = Arc::new(InMemoryStore::new());
    let service =
        Arc::new(GatewayService::new(config, store).context("Failed to create gateway service")?);

    let shutdown_handle = Arc::clone(&service);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received ctrl-c, shutting down");
            shutdown_handle.shutdown();
        }
    });

    service.start().await.context("Gateway server failed")?;
    info!("Server stopped");
    Ok(())
}
