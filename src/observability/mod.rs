//! # Observability Infrastructure
//!
//! Structured logging through `tracing`, per-request spans and counters, and an
//! optional Prometheus exporter.

pub mod http_tracing;
pub mod logging;
pub mod metrics;

pub use http_tracing::trace_http_requests;
pub use logging::{init_logging, log_config_info};
pub use self::metrics::init_metrics;

use crate::config::ObservabilityConfig;
use crate::errors::Result;
use tracing::info;

/// Initialize logging and, when enabled, metrics export
pub fn init_observability(config: &ObservabilityConfig) -> Result<()> {
    init_logging(config)?;

    if config.enable_metrics {
        init_metrics(config)?;
    }

    info!(
        service_name = %config.service_name,
        log_level = %config.log_level,
        json_logging = config.json_logging,
        metrics_enabled = config.enable_metrics,
        "Observability initialized successfully"
    );

    Ok(())
}
