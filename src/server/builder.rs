//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{AdminError, Result};
use tracing::info;

/// Server builder for easier configuration
#[derive(Debug, Default)]
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| AdminError::config("Configuration is required"))?;

        HttpServer::new(&config).await
    }
}

/// Build the server for `config` and serve until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    let server = ServerBuilder::new().with_config(config).build().await?;

    info!(
        "Server starting at: http://{}",
        server.config().address()
    );
    info!("API endpoints:");
    info!("   GET  /health");
    info!("   POST /api/auth/login | /api/auth/forgot-password | /api/auth/reset-password");
    info!("   GET  /api/auth/me");
    info!("   *    /api/admin/admins | /api/admin/roles | /api/admin/permissions");

    server.start().await
}
