//! Authentication configuration

use super::*;
use crate::utils::auth::generate_jwt_secret;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Authentication configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    /// Session token lifetime in seconds
    #[serde(default = "default_jwt_expiration")]
    pub jwt_expiration: u64,
    /// `iss` claim written into and required from session tokens
    #[serde(default = "default_jwt_issuer")]
    pub jwt_issuer: String,
    /// Password reset ticket lifetime in seconds
    #[serde(default = "default_reset_token_ttl")]
    pub reset_token_ttl: u64,
    /// Frontend base URL used in reset links
    #[serde(default = "default_reset_link_base")]
    pub reset_link_base: String,
    /// Upper bound for a single guard lookup against the store
    #[serde(default = "default_permission_check_timeout_ms")]
    pub permission_check_timeout_ms: u64,
    /// Minimum accepted password length
    #[serde(default = "default_password_min_length")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: generate_jwt_secret(),
            jwt_expiration: default_jwt_expiration(),
            jwt_issuer: default_jwt_issuer(),
            reset_token_ttl: default_reset_token_ttl(),
            reset_link_base: default_reset_link_base(),
            permission_check_timeout_ms: default_permission_check_timeout_ms(),
            password_min_length: default_password_min_length(),
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration", &self.jwt_expiration)
            .field("jwt_issuer", &self.jwt_issuer)
            .field("reset_token_ttl", &self.reset_token_ttl)
            .field("reset_link_base", &self.reset_link_base)
            .field("permission_check_timeout_ms", &self.permission_check_timeout_ms)
            .field("password_min_length", &self.password_min_length)
            .finish()
    }
}

impl AuthConfig {
    pub fn permission_check_timeout(&self) -> Duration {
        Duration::from_millis(self.permission_check_timeout_ms)
    }

    pub fn reset_token_ttl(&self) -> chrono::Duration {
        // Capped at one day, the largest lifetime validation accepts
        chrono::Duration::seconds(i64::try_from(self.reset_token_ttl.min(86_400)).unwrap_or(86_400))
    }
}
