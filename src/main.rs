//! estate-admin - admin backend for a property-listing platform
//!
//! Serves the authentication, RBAC and management API over HTTP.

#![allow(missing_docs)]

use anyhow::Context;
use clap::Parser;
use estate_admin::config::BackendConfig;
use estate_admin::storage::seed::{BOOTSTRAP_ADMIN_EMAIL, seed_defaults};
use estate_admin::utils::auth::hash_password;
use estate_admin::utils::logging::init_logging;
use estate_admin::{Backend, Config};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "estate-admin", version, about)]
struct Cli {
    /// YAML configuration file; environment variables override its values
    #[arg(long, env = "ESTATE_ADMIN_CONFIG", default_value = "config/backend.yaml")]
    config: PathBuf,

    /// Insert the default permission catalogue, super-admin role and bootstrap admin
    #[arg(long)]
    seed: bool,

    /// Password for the bootstrap admin created by --seed
    #[arg(long, env = "SEED_ADMIN_PASSWORD", default_value = "admin123", hide_env_values = true)]
    seed_password: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display with context chain, not Debug
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let (config, load_error) = match Config::from_file(&cli.config).await {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let config = Config {
        backend: BackendConfig::with_env_overrides(config.backend, |key| std::env::var(key).ok())
            .context("Invalid environment override")?,
    };
    config.validate().context("Invalid configuration")?;

    init_logging(config.logging()).context("Failed to initialize logging")?;
    if let Some(e) = load_error {
        warn!(
            path = %cli.config.display(),
            "Configuration file not loaded, using environment and defaults: {}", e
        );
    }

    let backend = Backend::new(config)
        .await
        .context("Failed to start backend")?;

    if cli.seed {
        let password_hash = hash_password(&cli.seed_password)?;
        let report = seed_defaults(backend.state().auth.store().as_ref(), &password_hash)
            .await
            .context("Seeding failed")?;
        if report.admin_created {
            info!(email = BOOTSTRAP_ADMIN_EMAIL, "Bootstrap super admin created");
        }
    }

    backend.run().await?;
    Ok(())
}
