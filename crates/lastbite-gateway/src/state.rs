use std::sync::Arc;

use lastbite_ledger::MarketStore;

use crate::config::GatewayConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// The storage collaborator; all stock-affecting mutations go
    /// through this port.
    pub store: Arc<dyn MarketStore>,
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn MarketStore>, config: GatewayConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}
