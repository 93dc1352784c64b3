//! Middleware stack for the gateway.

pub mod admin_auth;
pub mod cors;

pub use admin_auth::require_admin_secret;
pub use cors::cors_layer;
