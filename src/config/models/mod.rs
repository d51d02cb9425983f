//! Configuration data models
//!
//! This module defines all configuration structures used by the admin backend.

#![allow(missing_docs)]

pub mod auth;
pub mod backend;
pub mod email;
pub mod logging;
pub mod server;
pub mod storage;

// Re-export all configuration types
pub use auth::*;
pub use backend::*;
pub use email::*;
pub use logging::*;
pub use server::*;
pub use storage::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    3000
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    1024 * 1024 // 1MB
}

pub fn default_database_url() -> String {
    "sqlite::memory:".to_string()
}

pub fn default_max_connections() -> u32 {
    10
}

/// Connection timeout in seconds
pub fn default_connection_timeout() -> u64 {
    5
}

/// One day
pub fn default_jwt_expiration() -> u64 {
    86400
}

pub fn default_jwt_issuer() -> String {
    "estate-admin".to_string()
}

/// Thirty minutes
pub fn default_reset_token_ttl() -> u64 {
    1800
}

pub fn default_reset_link_base() -> String {
    "http://localhost:5173".to_string()
}

pub fn default_permission_check_timeout_ms() -> u64 {
    5000
}

pub fn default_password_min_length() -> usize {
    6
}

pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}

/// Parse a duration such as `86400`, `45s`, `30m`, `12h` or `1d` into seconds
pub fn parse_duration_secs(value: &str) -> Option<u64> {
    let value = value.trim();
    let (digits, multiplier) = match value.char_indices().last()? {
        (idx, 's') => (&value[..idx], 1),
        (idx, 'm') => (&value[..idx], 60),
        (idx, 'h') => (&value[..idx], 3600),
        (idx, 'd') => (&value[..idx], 86400),
        _ => (value, 1),
    };
    digits.parse::<u64>().ok()?.checked_mul(multiplier)
}
