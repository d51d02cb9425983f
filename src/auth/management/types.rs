//! Request and response shapes of the management API

use crate::auth::rbac::PermissionMap;
use crate::storage::{AdminStatus, PermissionRecord, RoleSummary};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 100;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub status: AdminStatus,
    #[serde(default)]
    pub is_super_admin: bool,
    #[serde(default)]
    pub role_ids: Vec<i32>,
    #[serde(default)]
    pub permission_ids: Vec<i32>,
}

/// Absent fields are left unchanged; present id lists replace the current set
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminRequest {
    pub name: Option<String>,
    pub status: Option<AdminStatus>,
    pub is_super_admin: Option<bool>,
    pub password: Option<String>,
    pub role_ids: Option<Vec<i32>>,
    pub permission_ids: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleRequest {
    pub name: String,
    /// Derived from the name when absent
    pub slug: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub permission_ids: Vec<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub permission_ids: Option<Vec<i32>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePermissionRequest {
    pub name: String,
    pub module: String,
    pub action: String,
    pub description: Option<String>,
}

/// Admin as returned by the management API
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDetails {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub status: AdminStatus,
    pub is_super_admin: bool,
    pub login_attempts: i32,
    pub last_login_at: Option<DateTime<Utc>>,
    pub last_login_ip: Option<String>,
    pub created_at: DateTime<Utc>,
    pub roles: Vec<RoleSummary>,
    pub permissions: PermissionMap,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleDetails {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub permissions: PermissionMap,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionDetails {
    pub id: i32,
    pub name: String,
    pub module: String,
    pub action: String,
    pub description: Option<String>,
}

impl From<PermissionRecord> for PermissionDetails {
    fn from(record: PermissionRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            module: record.module,
            action: record.action,
            description: record.description,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        Self {
            page,
            limit,
            total,
            pages: total.div_ceil(limit.max(1)),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AdminListing {
    pub admins: Vec<AdminDetails>,
    pub pagination: Pagination,
}
