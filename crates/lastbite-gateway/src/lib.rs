//! # lastbite-gateway
//!
//! REST API layer for the Last Bite marketplace.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                    API GATEWAY                        │
//! ├───────────────────────────────────────────────────────┤
//! │   /api/users   /api/foods   /api/purchases   /api/admin│
//! │        │            │             │              │     │
//! │  ┌─────┴────────────┴─────────────┴──────────────┴──┐ │
//! │  │        Middleware: CORS → Trace → AdminAuth      │ │
//! │  └───────────────────────┬──────────────────────────┘ │
//! └──────────────────────────┼────────────────────────────┘
//!                            │
//!                    MarketStore port
//!                            │
//!                            ▼
//!                   lastbite-ledger core
//! ```
//!
//! The gateway parses and shapes requests, then delegates every
//! stock-affecting mutation to the Stock Ledger through the
//! `MarketStore` port; it never touches stock itself. Core failures are
//! translated to transport responses: `NotFound` → 404,
//! `Validation`/`InsufficientStock` → 400, anything unexpected → 500.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod state;

pub use config::{AdminConfig, ConfigError, CorsConfig, GatewayConfig, HttpConfig};
pub use error::{ApiError, GatewayError};
pub use routes::build_router;
pub use service::GatewayService;
pub use state::AppState;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
