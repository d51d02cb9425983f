//! Logging initialization
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` takes precedence over the
//! configured level. Audit events are emitted under the `audit` target so they can
//! be filtered independently, e.g. `RUST_LOG=info,audit=warn`.

use crate::config::LoggingConfig;
use crate::utils::error::{AdminError, Result};
use tracing_subscriber::EnvFilter;

/// Target used for audit log entries
pub const AUDIT_TARGET: &str = "audit";

/// Initialize the global subscriber from configuration
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| AdminError::config(format!("Invalid log level '{}': {}", config.level, e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| AdminError::config(format!("Failed to install logger: {}", e)))
}
