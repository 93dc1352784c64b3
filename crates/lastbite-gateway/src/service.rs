//! Gateway service lifecycle: bind, serve, graceful shutdown.

use std::sync::Arc;

use lastbite_ledger::MarketStore;
use tokio::sync::watch;
use tracing::info;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::routes::build_router;
use crate::state::AppState;

/// Owns the HTTP server task and its shutdown channel.
pub struct GatewayService {
    state: AppState,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl GatewayService {
    /// Create a new gateway service.
    ///
    /// # Errors
    /// Returns `GatewayError::Config` if the configuration is invalid.
    pub fn new(
        config: GatewayConfig,
        store: Arc<dyn MarketStore>,
    ) -> Result<Self, GatewayError> {
        config.validate()?;
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Ok(Self {
            state: AppState::new(store, config),
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Bind the configured address and serve until shutdown is signalled.
    pub async fn start(&self) -> Result<(), GatewayError> {
        let addr = self.state.config.http_addr();
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| GatewayError::Bind(e.to_string()))?;
        let local_addr = listener
            .local_addr()
            .map_err(|e| GatewayError::Bind(e.to_string()))?;
        info!("HTTP API listening on {}", local_addr);

        let app = build_router(self.state.clone());
        let mut shutdown_rx = self.shutdown_rx.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
                info!("Gateway shutting down");
            })
            .await
            .map_err(|e| GatewayError::Serve(e.to_string()))
    }

    /// Signal the serve loop to drain and stop.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}
