//! # Configuration Management
//!
//! Environment-driven configuration for the district data service. The only
//! variable most deployments set is `PORT`; everything else has a default.

pub mod settings;

pub use settings::{ApiServerConfig, DatabaseConfig, ObservabilityConfig};

use std::path::PathBuf;

use validator::Validate;

use crate::{Error, Result};

/// Application configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub api: ApiServerConfig,
    pub database: DatabaseConfig,
    pub observability: ObservabilityConfig,
}

impl Config {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let port = settings::env_or("PORT", ApiServerConfig::default().port)?;

        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or_else(|_| ApiServerConfig::default().bind_address);

        let static_dir = std::env::var("STATIC_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);

        let config = Self {
            api: ApiServerConfig { bind_address, port, static_dir },
            database: DatabaseConfig::from_env()?,
            observability: ObservabilityConfig::from_env()?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate every section of the configuration
    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;
        self.database.validate()?;
        self.observability.validate()?;

        if self.database.min_connections > self.database.max_connections {
            return Err(Error::config("min_connections cannot be greater than max_connections"));
        }

        if self.observability.enable_metrics && self.observability.metrics_port == self.api.port {
            return Err(Error::config("API and metrics ports cannot be the same"));
        }

        Ok(())
    }
}
