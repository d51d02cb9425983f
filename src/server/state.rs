//! Application state shared across HTTP handlers

use crate::auth::AuthSystem;
use crate::config::Config;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// Both fields are behind `Arc`, so cloning the state per worker is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Backend configuration (shared read-only)
    pub config: Arc<Config>,
    /// Authentication, authorization and management entry point
    pub auth: Arc<AuthSystem>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(config: Config, auth: AuthSystem) -> Self {
        Self {
            config: Arc::new(config),
            auth: Arc::new(auth),
        }
    }

    /// Get backend configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
