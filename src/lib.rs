//! # estate-admin
//!
//! Administrative backend for a property-listing platform. Admins log in with
//! email and password, receive a signed session token, and every protected
//! request is checked against a role/permission model:
//!
//! - **Authentication guard**: the bearer token must verify and still name an
//!   active admin at the time of the request
//! - **Authorization guard**: the admin must hold `(module, action)` directly or
//!   through one of its roles; super admins bypass the lookup
//! - **Password reset**: single-use, time-limited tickets redeemed in one
//!   transaction
//! - **Management API**: admins, roles and permissions over JSON
//!
//! ## Running
//!
//! ```rust,no_run
//! use estate_admin::{Backend, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/backend.yaml").await?;
//!     let backend = Backend::new(config).await?;
//!     backend.run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod auth;
pub mod config;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use auth::{AdminProfile, AuthSystem, AuthenticatedAdmin};
pub use config::Config;
pub use server::{AppState, HttpServer};
pub use utils::error::{AdminError, Result};

use tracing::info;

/// The admin backend: configuration plus a ready HTTP server
pub struct Backend {
    config: Config,
    server: server::HttpServer,
}

impl Backend {
    /// Connect storage, run migrations and prepare the server
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating backend instance");

        let server = server::HttpServer::new(&config).await?;

        Ok(Self { config, server })
    }

    /// Application state, e.g. for seeding before the server starts
    pub fn state(&self) -> &AppState {
        self.server.state()
    }

    /// Serve until shutdown
    pub async fn run(self) -> Result<()> {
        info!("Starting estate-admin backend");
        info!("Configuration: {:#?}", self.config);

        self.server.start().await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information stamped by the build script
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build time as UNIX seconds
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Build information of the running binary
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
