//! Error types for the admin backend

use thiserror::Error;

/// Result type alias for the admin backend
pub type Result<T> = std::result::Result<T, AdminError>;

/// Main error type for the admin backend
///
/// Session-token failures (`MissingToken`, `InvalidToken`) and reset-ticket
/// failures (`InvalidOrExpiredToken`) are separate kinds and never share a variant.
#[derive(Error, Debug)]
pub enum AdminError {
    /// No bearer token on a protected request
    #[error("Access token required")]
    MissingToken,

    /// Malformed, badly signed or expired session token, or an admin that is no longer active
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Authenticated admin lacks the required capability
    #[error("Insufficient permissions for {module}.{action}")]
    Forbidden { module: String, action: String },

    /// The permission lookup itself failed or did not finish in time
    #[error("Permission check failed: {0}")]
    AuthorizationCheckFailed(String),

    /// Unknown email, inactive admin or wrong password at login
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Reset ticket unknown, already redeemed or past its expiry
    #[error("Invalid or expired reset token")]
    InvalidOrExpiredToken,

    /// Not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict errors (duplicate email, slug, permission)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Bad request errors
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Storage errors not originating in the database driver
    #[error("Storage error: {0}")]
    Storage(String),

    /// JWT errors raised while signing
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cryptographic errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Outbound email errors
    #[error("Email error: {0}")]
    Email(String),

    /// Timeout errors
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
