//! Top-level backend configuration

use super::*;
use crate::utils::error::{AdminError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::debug;

/// Backend configuration as read from YAML or the environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub email: EmailConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl BackendConfig {
    /// Build a configuration from defaults overridden by environment variables
    pub fn from_env() -> Result<Self> {
        Self::default().with_env_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from a variable lookup; unset variables keep their current value
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(expires_in) = lookup("JWT_EXPIRES_IN") {
            self.auth.jwt_expiration = parse_duration_secs(&expires_in).ok_or_else(|| {
                AdminError::config(format!("JWT_EXPIRES_IN is not a duration: {}", expires_in))
            })?;
        }
        if let Some(issuer) = lookup("JWT_ISSUER") {
            self.auth.jwt_issuer = issuer;
        }
        if let Some(base) = lookup("FRONTEND_URL") {
            self.auth.reset_link_base = base;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.storage.database.url = url;
        }
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| AdminError::config(format!("PORT is not a valid port: {}", port)))?;
        }
        if let Some(dev_mode) = lookup("DEV_MODE") {
            self.server.dev_mode = matches!(dev_mode.as_str(), "1" | "true" | "yes");
        }
        if let Some(from) = lookup("EMAIL_FROM") {
            self.email.from_address = from;
        }
        if let Some(level) = lookup("LOG_LEVEL") {
            self.logging.level = level;
        }

        debug!("Environment overrides applied");
        Ok(self)
    }
}
