//! RBAC type definitions

use crate::utils::error::AdminError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A (module, action) pair, e.g. (`property`, `edit`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Capability {
    /// Functional area, e.g. `property`
    pub module: String,
    /// Operation within the module, e.g. `edit`
    pub action: String,
}

impl Capability {
    pub fn new<M: Into<String>, A: Into<String>>(module: M, action: A) -> Self {
        Self {
            module: module.into(),
            action: action.into(),
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module, self.action)
    }
}

impl FromStr for Capability {
    type Err = AdminError;

    /// Parse the `module.action` notation
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('.') {
            Some((module, action)) if !module.is_empty() && !action.is_empty() => {
                Ok(Self::new(module, action))
            }
            _ => Err(AdminError::validation(format!(
                "Capability must look like module.action: {}",
                s
            ))),
        }
    }
}

/// Outcome of a successful authorization check
///
/// Denial is not a variant: it is reported as `AdminError::Forbidden`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDecision {
    /// Super-admin flag set; no lookup was performed
    SuperAdmin,
    /// A direct or role-inherited grant matched
    Granted,
}
