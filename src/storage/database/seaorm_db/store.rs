use crate::auth::rbac::Capability;
use crate::storage::types::*;
use crate::storage::{AdminDirectory, CredentialStore};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::types::SeaOrmDatabase;

#[async_trait]
impl CredentialStore for SeaOrmDatabase {
    async fn find_active_admin_by_id(&self, id: i32) -> Result<Option<AdminRecord>> {
        self.find_active_admin(id).await
    }

    async fn find_active_admin_by_email(&self, email: &str) -> Result<Option<AdminCredentials>> {
        self.find_active_admin_credentials(email).await
    }

    async fn has_permission(&self, admin_id: i32, capability: &Capability) -> Result<bool> {
        self.admin_has_permission(admin_id, capability).await
    }

    async fn admin_roles(&self, admin_id: i32) -> Result<Vec<RoleSummary>> {
        self.roles_of_admin(admin_id).await
    }

    async fn admin_permissions(&self, admin_id: i32) -> Result<Vec<PermissionRecord>> {
        self.permissions_of_admin(admin_id).await
    }

    async fn record_failed_login(&self, admin_id: i32) -> Result<()> {
        self.increment_login_attempts(admin_id).await
    }

    async fn record_successful_login(&self, admin_id: i32, ip: Option<String>) -> Result<()> {
        self.stamp_login(admin_id, ip).await
    }

    async fn create_reset_ticket(&self, ticket: ResetTicket) -> Result<()> {
        self.store_reset_ticket(ticket).await
    }

    async fn redeem_reset_ticket(
        &self,
        email: &str,
        token_hash: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        self.consume_reset_ticket(email, token_hash, password_hash, now)
            .await
    }

    async fn health_check(&self) -> Result<()> {
        self.ping().await
    }
}

#[async_trait]
impl AdminDirectory for SeaOrmDatabase {
    async fn find_admin_by_id(&self, id: i32) -> Result<Option<AdminRecord>> {
        self.find_admin(id).await
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        self.admin_email_exists(email).await
    }

    async fn list_admins(&self, query: &AdminQuery) -> Result<AdminPage> {
        self.list_admin_page(query).await
    }

    async fn create_admin(&self, admin: NewAdmin) -> Result<i32> {
        self.insert_admin(admin).await
    }

    async fn update_admin(&self, id: i32, patch: AdminPatch) -> Result<bool> {
        self.patch_admin(id, patch).await
    }

    async fn delete_admin(&self, id: i32) -> Result<bool> {
        self.remove_admin(id).await
    }

    async fn create_role(&self, role: NewRole) -> Result<i32> {
        self.insert_role(role).await
    }

    async fn update_role(&self, id: i32, patch: RolePatch) -> Result<bool> {
        self.patch_role(id, patch).await
    }

    async fn role_slug_exists(&self, slug: &str) -> Result<bool> {
        self.slug_exists(slug).await
    }

    async fn list_roles(&self) -> Result<Vec<RoleRecord>> {
        self.all_roles().await
    }

    async fn role_permissions(&self, role_id: i32) -> Result<Vec<PermissionRecord>> {
        self.permissions_of_role(role_id).await
    }

    async fn create_permission(&self, permission: NewPermission) -> Result<i32> {
        self.insert_permission(permission).await
    }

    async fn permission_exists(&self, name: &str, capability: &Capability) -> Result<bool> {
        self.permission_taken(name, capability).await
    }

    async fn list_permissions(&self) -> Result<Vec<PermissionRecord>> {
        self.all_permissions().await
    }
}
