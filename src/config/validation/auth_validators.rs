//! Authentication configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating auth configuration");

        if self.jwt_secret.is_empty() {
            return Err("JWT secret cannot be empty".to_string());
        }

        if matches!(
            self.jwt_secret.as_str(),
            "your-secret-key" | "change-me" | "change-me-in-production"
        ) {
            return Err("JWT secret must not use a placeholder value".to_string());
        }

        if self.jwt_secret.len() < 32 {
            return Err("JWT secret should be at least 32 characters long".to_string());
        }

        if self.jwt_expiration == 0 {
            return Err("JWT expiration must be greater than 0".to_string());
        }

        if self.jwt_expiration > 86400 * 30 {
            return Err("JWT expiration should not exceed 30 days".to_string());
        }

        if self.jwt_issuer.is_empty() {
            return Err("JWT issuer cannot be empty".to_string());
        }

        if self.reset_token_ttl == 0 || self.reset_token_ttl > 86_400 {
            return Err("Reset token lifetime must be between 1 second and 1 day".to_string());
        }

        url::Url::parse(&self.reset_link_base)
            .map_err(|e| format!("Invalid reset link base '{}': {}", self.reset_link_base, e))?;

        if self.permission_check_timeout_ms == 0 {
            return Err("Permission check timeout must be greater than 0".to_string());
        }

        if self.password_min_length == 0 {
            return Err("Minimum password length must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }

        let supported = ["sqlite:", "postgres://", "postgresql://"];
        if !supported.iter().any(|scheme| self.url.starts_with(scheme)) {
            return Err(format!("Unsupported database URL: {}", self.url));
        }

        if self.max_connections == 0 {
            return Err("Database max connections must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for EmailConfig {
    fn validate(&self) -> Result<(), String> {
        if self.enabled && !self.from_address.contains('@') {
            return Err(format!(
                "Sender address is not an email: {}",
                self.from_address
            ));
        }
        Ok(())
    }
}
