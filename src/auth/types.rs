//! Authentication and authorization types

use super::rbac::PermissionMap;
use crate::storage::{AdminRecord, AdminStatus, RoleSummary};
use serde::{Deserialize, Serialize};

/// The admin attached to a request once the authentication guard passed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedAdmin {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub status: AdminStatus,
    pub is_super_admin: bool,
}

impl From<AdminRecord> for AuthenticatedAdmin {
    fn from(record: AdminRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            status: record.status,
            is_super_admin: record.is_super_admin,
        }
    }
}

/// Admin with roles and grouped effective permissions
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub status: AdminStatus,
    pub is_super_admin: bool,
    pub roles: Vec<RoleSummary>,
    pub permissions: PermissionMap,
}

/// Result of a successful login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutcome {
    pub access_token: String,
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: u64,
    pub admin: AdminProfile,
}
