//! Application configuration

use std::env;

use account_service::AccountServiceConfig;

/// Port the ledger listens on when `PORT` is unset
pub const DEFAULT_PORT: u16 = 3333;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listening host
    pub host: String,
    /// API port
    pub port: u16,
    /// Ledger settings
    pub service: AccountServiceConfig,
}

impl AppConfig {
    /// Create a new configuration from environment variables
    pub fn new() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            service: AccountServiceConfig::from_env(),
        }
    }

    /// Address to bind, as `host:port`
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
