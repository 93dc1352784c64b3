//! Gateway configuration with validation.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Main gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// HTTP server configuration
    pub http: HttpConfig,
    /// Admin surface configuration
    pub admin: AdminConfig,
    /// CORS configuration
    pub cors: CorsConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            http: HttpConfig::default(),
            admin: AdminConfig::default(),
            cors: CorsConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults. Recognized: `LASTBITE_HTTP_HOST`, `LASTBITE_HTTP_PORT`,
    /// `LASTBITE_ADMIN_SECRET`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(host) = std::env::var("LASTBITE_HTTP_HOST") {
            config.http.host = host
                .parse()
                .map_err(|_| ConfigError::InvalidHost(host.clone()))?;
        }
        if let Ok(port) = std::env::var("LASTBITE_HTTP_PORT") {
            config.http.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }
        if let Ok(secret) = std::env::var("LASTBITE_ADMIN_SECRET") {
            config.admin.secret_key = secret;
        }
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.admin.secret_key.is_empty() {
            return Err(ConfigError::EmptyAdminSecret);
        }
        Ok(())
    }

    /// HTTP server bind address
    pub fn http_addr(&self) -> SocketAddr {
        SocketAddr::new(self.http.host, self.http.port)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Bind address
    pub host: IpAddr,
    /// Bind port
    pub port: u16,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
        }
    }
}

/// Admin surface configuration.
///
/// The shared secret is a development default; deployments override it
/// via `LASTBITE_ADMIN_SECRET`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Shared secret compared against the login payload and the
    /// `x-admin-secret` header on protected admin routes.
    pub secret_key: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            secret_key: "lastbite_admin_dev_secret".to_string(),
        }
    }
}

/// CORS configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Explicit allowed origins; empty means permissive (dev mode).
    pub allowed_origins: Vec<String>,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid host address: {0}")]
    InvalidHost(String),

    #[error("invalid port: {0}")]
    InvalidPort(String),

    #[error("admin secret key must not be empty")]
    EmptyAdminSecret,
}
