//! Storage-agnostic records exchanged with the credential store

use crate::auth::rbac::Capability;
use crate::utils::error::AdminError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Admin account status; only `Active` admins can log in or pass authentication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AdminStatus {
    #[default]
    Active,
    Inactive,
}

impl AdminStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminStatus::Active => "active",
            AdminStatus::Inactive => "inactive",
        }
    }
}

impl fmt::Display for AdminStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdminStatus {
    type Err = AdminError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AdminStatus::Active),
            "inactive" => Ok(AdminStatus::Inactive),
            other => Err(AdminError::validation(format!(
                "Status must be either active or inactive, got {}",
                other
            ))),
        }
    }
}

/// An admin account without its password hash
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdminRecord {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub status: AdminStatus,
    pub is_super_admin: bool,
    pub login_attempts: i32,
    pub last_login_at: Option<DateTime<Utc>>,
    pub last_login_ip: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AdminRecord {
    pub fn is_active(&self) -> bool {
        self.status == AdminStatus::Active
    }
}

/// An admin together with the stored password hash, used only by login
#[derive(Clone)]
pub struct AdminCredentials {
    pub admin: AdminRecord,
    pub password_hash: String,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("admin", &self.admin)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Role as listed on an admin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleSummary {
    pub id: i32,
    pub name: String,
    pub slug: String,
}

/// Full role row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleRecord {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Permission row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PermissionRecord {
    pub id: i32,
    pub name: String,
    pub module: String,
    pub action: String,
    pub description: Option<String>,
}

impl PermissionRecord {
    pub fn capability(&self) -> Capability {
        Capability::new(&self.module, &self.action)
    }
}

impl From<&PermissionRecord> for Capability {
    fn from(permission: &PermissionRecord) -> Self {
        permission.capability()
    }
}

impl From<PermissionRecord> for Capability {
    fn from(permission: PermissionRecord) -> Self {
        Capability::new(permission.module, permission.action)
    }
}

/// Insert payload for a new admin; the password is already hashed
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub status: AdminStatus,
    pub is_super_admin: bool,
    pub role_ids: Vec<i32>,
    pub permission_ids: Vec<i32>,
}

/// The mutable fields of an admin
///
/// `None` leaves a field untouched. `role_ids` and `permission_ids` replace the
/// whole assignment set when present; `Some(vec![])` clears it.
#[derive(Debug, Clone, Default)]
pub struct AdminPatch {
    pub name: Option<String>,
    pub status: Option<AdminStatus>,
    pub is_super_admin: Option<bool>,
    pub password_hash: Option<String>,
    pub role_ids: Option<Vec<i32>>,
    pub permission_ids: Option<Vec<i32>>,
}

impl AdminPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.status.is_none()
            && self.is_super_admin.is_none()
            && self.password_hash.is_none()
            && self.role_ids.is_none()
            && self.permission_ids.is_none()
    }
}

/// Insert payload for a role
#[derive(Debug, Clone)]
pub struct NewRole {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub permission_ids: Vec<i32>,
}

/// The mutable fields of a role; `permission_ids` replaces the grant set when present
#[derive(Debug, Clone, Default)]
pub struct RolePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub permission_ids: Option<Vec<i32>>,
}

/// Insert payload for a permission
#[derive(Debug, Clone)]
pub struct NewPermission {
    pub name: String,
    pub module: String,
    pub action: String,
    pub description: Option<String>,
}

/// Admin listing filter; `page` is 1-based
#[derive(Debug, Clone)]
pub struct AdminQuery {
    pub page: u64,
    pub limit: u64,
    pub search: Option<String>,
}

impl AdminQuery {
    /// Rows to skip; fails when the page lies beyond what a SQL `OFFSET` can address
    pub fn offset(&self) -> Result<u64, AdminError> {
        self.page
            .saturating_sub(1)
            .checked_mul(self.limit)
            .filter(|offset| i64::try_from(*offset).is_ok())
            .ok_or_else(|| AdminError::validation("Page out of range"))
    }

    /// Trimmed, lowercased search term, if one was given
    pub fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }

    /// `%term%` LIKE pattern with `\`, `%` and `_` escaped by [`LIKE_ESCAPE`]
    pub fn search_pattern(&self) -> Option<String> {
        self.search_term().map(|term| {
            let mut pattern = String::with_capacity(term.len() + 2);
            pattern.push('%');
            for c in term.chars() {
                if matches!(c, '%' | '_' | LIKE_ESCAPE) {
                    pattern.push(LIKE_ESCAPE);
                }
                pattern.push(c);
            }
            pattern.push('%');
            pattern
        })
    }
}

/// Escape character used in admin search patterns
pub const LIKE_ESCAPE: char = '\\';

/// One page of admins plus the total number of matches
#[derive(Debug, Clone)]
pub struct AdminPage {
    pub admins: Vec<AdminRecord>,
    pub total: u64,
}

/// A password reset ticket as handed to the store
///
/// `token_hash` is the digest of the token mailed to the admin; the raw token is
/// never persisted.
#[derive(Debug, Clone)]
pub struct ResetTicket {
    pub email: String,
    pub token_hash: String,
    pub expires_at: DateTime<Utc>,
}
