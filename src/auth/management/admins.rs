use super::types::*;
use super::AdminManager;
use crate::auth::rbac::group_permissions;
use crate::storage::{AdminPatch, AdminQuery, AdminRecord, NewAdmin};
use crate::utils::auth::hash_password;
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::{validate_email, validate_length, validate_password};
use tracing::info;

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;

impl AdminManager {
    /// Validate, hash and insert a new admin; returns its id
    pub async fn create_admin(&self, request: CreateAdminRequest) -> Result<i32> {
        let name = request.name.trim().to_string();
        let email = request.email.trim().to_string();
        validate_length("Name", &name, NAME_MIN, NAME_MAX)?;
        validate_email(&email)?;
        validate_password(&request.password, self.config.password_min_length)?;

        if self.store.email_exists(&email).await? {
            return Err(AdminError::conflict("Email already exists"));
        }

        let id = self
            .store
            .create_admin(NewAdmin {
                name,
                email: email.clone(),
                password_hash: hash_password(&request.password)?,
                status: request.status,
                is_super_admin: request.is_super_admin,
                role_ids: request.role_ids,
                permission_ids: request.permission_ids,
            })
            .await?;

        info!(admin_id = id, %email, "Admin created successfully");
        Ok(id)
    }

    /// One page of admins, newest first, with roles and grouped permissions
    pub async fn list_admins(&self, query: AdminListQuery) -> Result<AdminListing> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query
            .limit
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let result = self
            .store
            .list_admins(&AdminQuery {
                page,
                limit,
                search: query.search,
            })
            .await?;

        let mut admins = Vec::with_capacity(result.admins.len());
        for record in result.admins {
            admins.push(self.details(record).await?);
        }

        Ok(AdminListing {
            admins,
            pagination: Pagination::new(page, limit, result.total),
        })
    }

    pub async fn get_admin(&self, id: i32) -> Result<AdminDetails> {
        let record = self
            .store
            .find_admin_by_id(id)
            .await?
            .ok_or_else(|| AdminError::not_found("Admin not found"))?;
        self.details(record).await
    }

    /// Apply the present fields of `request` to an existing admin
    pub async fn update_admin(&self, id: i32, request: UpdateAdminRequest) -> Result<()> {
        let name = request.name.map(|name| name.trim().to_string());
        if let Some(name) = &name {
            validate_length("Name", name, NAME_MIN, NAME_MAX)?;
        }
        let password_hash = match request.password.as_deref() {
            Some(password) => {
                validate_password(password, self.config.password_min_length)?;
                Some(hash_password(password)?)
            }
            None => None,
        };

        let patch = AdminPatch {
            name,
            status: request.status,
            is_super_admin: request.is_super_admin,
            password_hash,
            role_ids: request.role_ids,
            permission_ids: request.permission_ids,
        };

        if patch.is_empty() {
            return if self.store.find_admin_by_id(id).await?.is_some() {
                Ok(())
            } else {
                Err(AdminError::not_found("Admin not found"))
            };
        }

        if !self.store.update_admin(id, patch).await? {
            return Err(AdminError::not_found("Admin not found"));
        }

        info!(admin_id = id, "Admin updated successfully");
        Ok(())
    }

    /// Delete an admin; `actor_id` is the admin performing the deletion
    pub async fn delete_admin(&self, id: i32, actor_id: i32) -> Result<()> {
        if self.store.find_admin_by_id(id).await?.is_none() {
            return Err(AdminError::not_found("Admin not found"));
        }
        if id == actor_id {
            return Err(AdminError::bad_request("Cannot delete yourself"));
        }

        if !self.store.delete_admin(id).await? {
            return Err(AdminError::not_found("Admin not found"));
        }

        info!(admin_id = id, actor_id, "Admin deleted successfully");
        Ok(())
    }

    async fn details(&self, record: AdminRecord) -> Result<AdminDetails> {
        let roles = self.store.admin_roles(record.id).await?;
        let permissions = group_permissions(self.store.admin_permissions(record.id).await?);

        Ok(AdminDetails {
            id: record.id,
            name: record.name,
            email: record.email,
            status: record.status,
            is_super_admin: record.is_super_admin,
            login_attempts: record.login_attempts,
            last_login_at: record.last_login_at,
            last_login_ip: record.last_login_ip,
            created_at: record.created_at,
            roles,
            permissions,
        })
    }
}
