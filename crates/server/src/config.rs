//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults match a MongoDB running locally
//! with no authentication.
//!
//! - `ROSTER_MONGODB_URI` - MongoDB connection string
//!   (default: `mongodb://localhost:27017`)
//! - `ROSTER_DATABASE` - Database holding the user collection
//!   (default: `roster`)
//! - `ROSTER_COLLECTION` - Collection the store gateway owns
//!   (default: `users`)
//! - `ROSTER_HOST` - Bind address (default: `127.0.0.1`)
//! - `ROSTER_PORT` - Listen port (default: `8080`)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// MongoDB connection string (may embed credentials)
    pub mongodb_uri: SecretString,
    /// Database holding the user collection
    pub database: String,
    /// Collection the store gateway owns
    pub collection: String,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if a variable is present but
    /// cannot be parsed (host or port).
    pub fn from_env() -> Result<Self, ConfigError> {
        let mongodb_uri = SecretString::from(env_or(
            "ROSTER_MONGODB_URI",
            "mongodb://localhost:27017",
        ));
        let database = env_or("ROSTER_DATABASE", "roster");
        let collection = env_or("ROSTER_COLLECTION", "users");

        let host = env_or("ROSTER_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ROSTER_HOST".to_string(), e.to_string()))?;
        let port = env_or("ROSTER_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ROSTER_PORT".to_string(), e.to_string()))?;

        Ok(Self {
            mongodb_uri,
            database,
            collection,
            host,
            port,
        })
    }

    /// The socket address to bind the server to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_load_without_environment() {
        let config = ServerConfig::from_env().expect("defaults should load");
        assert_eq!(config.database, "roster");
        assert_eq!(config.collection, "users");
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
    }
}
