//! Server configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::warn;

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Port cannot be 0".to_string());
        }

        if self.max_body_size == 0 {
            return Err("Max body size cannot be 0".to_string());
        }

        if let Some(0) = self.workers {
            return Err("Worker count cannot be 0".to_string());
        }

        if self.dev_mode {
            warn!("Development mode is on: error responses include internal details");
        }

        self.cors.validate()
    }
}

impl Validate for CorsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && self.allows_all_origins() {
            warn!("CORS allows all origins. This may be insecure for production.");
        }

        for origin in self.allowed_origins.iter().filter(|o| o.as_str() != "*") {
            url::Url::parse(origin)
                .map_err(|e| format!("Invalid CORS origin '{}': {}", origin, e))?;
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        Ok(())
    }
}
