use super::types::*;
use super::AdminManager;
use crate::auth::rbac::group_permissions;
use crate::storage::{NewRole, RolePatch};
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::{validate_length, validate_max_length};
use tracing::info;

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;
const DESCRIPTION_MAX: usize = 255;

/// Derive a slug from a display name
///
/// Lowercases, drops everything but word characters and spaces, and turns each
/// run of spaces into a single `-`.
pub fn slugify(text: &str) -> String {
    let kept: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == ' ')
        .collect();

    let mut slug = String::with_capacity(kept.len());
    let mut in_space = false;
    for c in kept.chars() {
        if c == ' ' {
            if !in_space {
                slug.push('-');
            }
            in_space = true;
        } else {
            slug.push(c);
            in_space = false;
        }
    }
    slug
}

impl AdminManager {
    /// Create a role with its permission grants; returns its id
    pub async fn create_role(&self, request: CreateRoleRequest) -> Result<i32> {
        let name = request.name.trim().to_string();
        validate_length("Name", &name, NAME_MIN, NAME_MAX)?;
        validate_max_length("Description", request.description.as_deref(), DESCRIPTION_MAX)?;

        let slug = match request.slug {
            Some(slug) => slug.trim().to_string(),
            None => slugify(&name),
        };
        validate_length("Slug", &slug, NAME_MIN, NAME_MAX)?;

        if self.store.role_slug_exists(&slug).await? {
            return Err(AdminError::conflict("Role with this slug already exists"));
        }

        let id = self
            .store
            .create_role(NewRole {
                name,
                slug: slug.clone(),
                description: request.description,
                permission_ids: request.permission_ids,
            })
            .await?;

        info!(role_id = id, %slug, "Role created successfully");
        Ok(id)
    }

    /// Rename, redescribe or regrant a role; the slug never changes
    pub async fn update_role(&self, id: i32, request: UpdateRoleRequest) -> Result<()> {
        let name = request.name.map(|name| name.trim().to_string());
        if let Some(name) = &name {
            validate_length("Name", name, NAME_MIN, NAME_MAX)?;
        }
        validate_max_length("Description", request.description.as_deref(), DESCRIPTION_MAX)?;

        let patch = RolePatch {
            name,
            description: request.description,
            permission_ids: request.permission_ids,
        };

        if !self.store.update_role(id, patch).await? {
            return Err(AdminError::not_found("Role not found"));
        }

        info!(role_id = id, "Role updated successfully");
        Ok(())
    }

    /// All roles by name, each with its grouped permissions
    pub async fn list_roles(&self) -> Result<Vec<RoleDetails>> {
        let roles = self.store.list_roles().await?;

        let mut details = Vec::with_capacity(roles.len());
        for role in roles {
            let permissions = group_permissions(self.store.role_permissions(role.id).await?);
            details.push(RoleDetails {
                id: role.id,
                name: role.name,
                slug: role.slug,
                description: role.description,
                created_at: role.created_at,
                permissions,
            });
        }
        Ok(details)
    }
}
