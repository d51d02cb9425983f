//! Configuration management for the admin backend
//!
//! This module handles loading and validation of all backend configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{AdminError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Backend configuration
    pub backend: BackendConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AdminError::config(format!("Failed to read config file: {}", e)))?;

        let backend: BackendConfig = serde_yaml::from_str(&content)
            .map_err(|e| AdminError::config(format!("Failed to parse config: {}", e)))?;

        let config = Self { backend };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            backend: BackendConfig::from_env()?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.backend.server
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.backend.storage
    }

    /// Get auth configuration
    pub fn auth(&self) -> &AuthConfig {
        &self.backend.auth
    }

    /// Get email configuration
    pub fn email(&self) -> &EmailConfig {
        &self.backend.email
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.backend.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.backend
            .server
            .validate()
            .map_err(|e| AdminError::config(format!("Server config error: {}", e)))?;

        self.backend
            .storage
            .database
            .validate()
            .map_err(|e| AdminError::config(format!("Database config error: {}", e)))?;

        self.backend
            .auth
            .validate()
            .map_err(|e| AdminError::config(format!("Auth config error: {}", e)))?;

        self.backend
            .email
            .validate()
            .map_err(|e| AdminError::config(format!("Email config error: {}", e)))?;

        self.backend
            .logging
            .validate()
            .map_err(|e| AdminError::config(format!("Logging config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.backend)
            .map_err(|e| AdminError::config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
