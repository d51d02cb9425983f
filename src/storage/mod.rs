//! Storage layer for the admin backend
//!
//! The guards and services only see the [`CredentialStore`] and
//! [`AdminDirectory`] traits. The handle is passed explicitly as an
//! `Arc<dyn AdminStore>`; [`database::Database`] is the SeaORM implementation
//! and [`memory::MemoryStore`] an in-process one.

/// Database storage module
pub mod database;
/// In-memory storage module
pub mod memory;
/// Default catalogue seeding
pub mod seed;
/// Storage record types
pub mod types;

pub use types::*;

use crate::auth::rbac::Capability;
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Lookups and writes the authentication, authorization and reset flows depend on
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Admin with this id, only if its status is active
    async fn find_active_admin_by_id(&self, id: i32) -> Result<Option<AdminRecord>>;

    /// Admin with this email and its password hash, only if active
    async fn find_active_admin_by_email(&self, email: &str) -> Result<Option<AdminCredentials>>;

    /// Whether the admin holds the capability directly or through any assigned role
    async fn has_permission(&self, admin_id: i32, capability: &Capability) -> Result<bool>;

    /// Roles assigned to the admin
    async fn admin_roles(&self, admin_id: i32) -> Result<Vec<RoleSummary>>;

    /// Distinct union of direct and role-inherited permissions
    async fn admin_permissions(&self, admin_id: i32) -> Result<Vec<PermissionRecord>>;

    /// Increment the admin's login attempt counter
    async fn record_failed_login(&self, admin_id: i32) -> Result<()>;

    /// Reset the attempt counter and stamp the login time and client address
    async fn record_successful_login(&self, admin_id: i32, ip: Option<String>) -> Result<()>;

    /// Persist a new reset ticket
    async fn create_reset_ticket(&self, ticket: ResetTicket) -> Result<()>;

    /// Atomically consume a ticket and set the new password hash
    ///
    /// Returns `false` when no unused, unexpired ticket matches (email, token_hash)
    /// at `now`; in that case nothing is written.
    async fn redeem_reset_ticket(
        &self,
        email: &str,
        token_hash: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool>;

    /// Cheap round trip proving the store is reachable
    async fn health_check(&self) -> Result<()>;
}

/// Management operations on admins, roles and permissions
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    /// Admin with this id regardless of status
    async fn find_admin_by_id(&self, id: i32) -> Result<Option<AdminRecord>>;

    async fn email_exists(&self, email: &str) -> Result<bool>;

    async fn list_admins(&self, query: &AdminQuery) -> Result<AdminPage>;

    /// Insert the admin with its role and permission assignments; returns the new id
    async fn create_admin(&self, admin: NewAdmin) -> Result<i32>;

    /// Apply a patch; `false` if the admin does not exist
    async fn update_admin(&self, id: i32, patch: AdminPatch) -> Result<bool>;

    /// Remove the admin and every assignment referencing it; `false` if absent
    async fn delete_admin(&self, id: i32) -> Result<bool>;

    async fn create_role(&self, role: NewRole) -> Result<i32>;

    /// Apply a patch; `false` if the role does not exist
    async fn update_role(&self, id: i32, patch: RolePatch) -> Result<bool>;

    async fn role_slug_exists(&self, slug: &str) -> Result<bool>;

    async fn list_roles(&self) -> Result<Vec<RoleRecord>>;

    async fn role_permissions(&self, role_id: i32) -> Result<Vec<PermissionRecord>>;

    async fn create_permission(&self, permission: NewPermission) -> Result<i32>;

    /// Whether a permission with this name or this (module, action) pair exists
    async fn permission_exists(&self, name: &str, capability: &Capability) -> Result<bool>;

    /// All permissions ordered by module, then action
    async fn list_permissions(&self) -> Result<Vec<PermissionRecord>>;
}

/// A complete store: credentials plus management
pub trait AdminStore: CredentialStore + AdminDirectory {}

impl<T> AdminStore for T where T: CredentialStore + AdminDirectory {}
