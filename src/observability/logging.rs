//! # Structured Logging
//!
//! Subscriber setup plus span macros for request and database tracking.
//! Logs go to standard error so that CLI output on stdout stays clean.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, ObservabilityConfig};
use crate::errors::{Error, Result};

/// Create a tracing span for request tracking.
///
/// ```rust,ignore
/// let span = request_span!("GET", "/map-data");
/// let span = request_span!("GET", "/district-records/1801", district_code = "1801");
/// ```
#[macro_export]
macro_rules! request_span {
    ($method:expr, $path:expr) => {
        tracing::info_span!(
            "http_request",
            method = %$method,
            path = %$path,
            request_id = %uuid::Uuid::new_v4()
        )
    };
    ($method:expr, $path:expr, $($field:tt)*) => {
        tracing::info_span!(
            "http_request",
            method = %$method,
            path = %$path,
            request_id = %uuid::Uuid::new_v4(),
            $($field)*
        )
    };
}

/// Create a tracing span for database operations.
#[macro_export]
macro_rules! db_span {
    ($operation:expr) => {
        tracing::debug_span!(
            "db_operation",
            operation = %$operation,
            operation_id = %uuid::Uuid::new_v4()
        )
    };
    ($operation:expr, $($field:tt)*) => {
        tracing::debug_span!(
            "db_operation",
            operation = %$operation,
            operation_id = %uuid::Uuid::new_v4(),
            $($field)*
        )
    };
}

/// Build the filter: `RUST_LOG` wins, otherwise the configured level.
fn build_filter(config: &ObservabilityConfig) -> Result<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.log_level).map_err(|e| {
            Error::config(format!("Invalid log level '{}': {}", config.log_level, e))
        }),
    }
}

/// Install the global tracing subscriber.
///
/// Installing twice is not an error; the first subscriber stays in place.
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = build_filter(config)?;

    let installed = if config.json_logging {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_current_span(true)
            .try_init()
    } else {
        fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(true).try_init()
    };

    if installed.is_err() {
        // Subscriber already set elsewhere (e.g. integration tests); ignore.
        tracing::debug!("Global tracing subscriber already installed");
    }

    Ok(())
}

/// Log configuration at startup
pub fn log_config_info(config: &Config) {
    tracing::info!(
        api_address = %config.api.socket_address(),
        static_dir = ?config.api.static_dir,
        database_type = "sqlite",
        auto_migrate = config.database.auto_migrate,
        metrics_enabled = config.observability.enable_metrics,
        "District data service configuration"
    );
}
