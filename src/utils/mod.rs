//! Utility modules for the admin backend
//!
//! - **auth**: password hashing and random token helpers
//! - **error**: the crate-wide error taxonomy and its HTTP mapping
//! - **logging**: tracing subscriber setup and the audit target
//! - **validation**: request field validators

pub mod auth;
pub mod error;
pub mod logging;
pub mod validation;

use chrono::Utc;

/// Current timestamp in whole seconds since the Unix epoch
pub fn current_timestamp() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}
