//! Outbound email configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Email configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    /// Dispatch emails at all
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Sender address
    #[serde(default = "default_from_address")]
    pub from_address: String,
    /// Sender display name
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            from_address: default_from_address(),
            from_name: default_from_name(),
        }
    }
}

fn default_from_address() -> String {
    "noreply@example.com".to_string()
}

fn default_from_name() -> String {
    "Estate Admin".to_string()
}
