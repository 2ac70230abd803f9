//! API configuration

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// API configuration
///
/// Read from `API_*` environment variables, e.g. `API_PORT=9000` or
/// `API_DATABASE_URL=postgres://...`. Unset values fall back to the defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// HS256 signing secret for bearer tokens
    pub jwt_secret: String,
    pub jwt_expiration_secs: u64,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            jwt_secret: "change-me-in-production".to_string(),
            jwt_expiration_secs: 3600,
            database_url: "postgres://localhost/party_master".to_string(),
            db_max_connections: 10,
            db_min_connections: 2,
            log_level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    /// Loads configuration from the environment over the defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_source(Environment::with_prefix("API").try_parsing(true))
    }

    fn from_source(environment: Environment) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Config::builder()
            .set_default("host", defaults.host)?
            .set_default("port", i64::from(defaults.port))?
            .set_default("jwt_secret", defaults.jwt_secret)?
            .set_default("jwt_expiration_secs", defaults.jwt_expiration_secs)?
            .set_default("database_url", defaults.database_url)?
            .set_default("db_max_connections", i64::from(defaults.db_max_connections))?
            .set_default("db_min_connections", i64::from(defaults.db_min_connections))?
            .set_default("log_level", defaults.log_level)?
            .add_source(environment)
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
