use crate::storage::types::*;
use crate::utils::error::Result;
use chrono::Utc;
use sea_orm::sea_query::Query;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, permission, permission_role, role, role_admin};
use super::grant_ops::replace_role_permissions;
use super::types::{SeaOrmDatabase, write_error};

impl SeaOrmDatabase {
    /// Insert a role and its grants in one transaction
    pub async fn insert_role(&self, new_role: NewRole) -> Result<i32> {
        debug!("Creating role: {}", new_role.slug);
        let now = Utc::now().fixed_offset();

        let txn = self.db.begin().await?;

        let model = role::ActiveModel {
            id: NotSet,
            name: Set(new_role.name),
            slug: Set(new_role.slug),
            description: Set(new_role.description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let id = entities::Role::insert(model)
            .exec(&txn)
            .await
            .map_err(|e| write_error(e, "Role with this slug already exists"))?
            .last_insert_id;

        replace_role_permissions(&txn, id, &new_role.permission_ids).await?;

        txn.commit().await?;
        Ok(id)
    }

    /// Apply a patch in one transaction; `false` if the role does not exist
    pub async fn patch_role(&self, id: i32, patch: RolePatch) -> Result<bool> {
        debug!("Updating role: {}", id);
        let txn = self.db.begin().await?;

        let Some(model) = entities::Role::find_by_id(id).one(&txn).await? else {
            txn.rollback().await?;
            return Ok(false);
        };

        let mut active: role::ActiveModel = model.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(description) = patch.description {
            active.description = Set(Some(description));
        }
        active.updated_at = Set(Utc::now().fixed_offset());
        active
            .update(&txn)
            .await
            .map_err(|e| write_error(e, "Role with this name already exists"))?;

        if let Some(permission_ids) = patch.permission_ids {
            replace_role_permissions(&txn, id, &permission_ids).await?;
        }

        txn.commit().await?;
        Ok(true)
    }

    pub async fn slug_exists(&self, slug: &str) -> Result<bool> {
        let count = entities::Role::find()
            .filter(role::Column::Slug.eq(slug))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn all_roles(&self) -> Result<Vec<RoleRecord>> {
        let roles = entities::Role::find()
            .order_by_asc(role::Column::Name)
            .all(&self.db)
            .await?;
        Ok(roles.iter().map(role::Model::to_record).collect())
    }

    /// Roles assigned to an admin
    pub async fn roles_of_admin(&self, admin_id: i32) -> Result<Vec<RoleSummary>> {
        let roles = entities::Role::find()
            .filter(
                role::Column::Id.in_subquery(
                    Query::select()
                        .column(role_admin::Column::RoleId)
                        .from(role_admin::Entity)
                        .and_where(role_admin::Column::AdminId.eq(admin_id))
                        .to_owned(),
                ),
            )
            .order_by_asc(role::Column::Name)
            .all(&self.db)
            .await?;
        Ok(roles.iter().map(role::Model::to_summary).collect())
    }

    /// Permissions carried by a role
    pub async fn permissions_of_role(&self, role_id: i32) -> Result<Vec<PermissionRecord>> {
        let permissions = entities::Permission::find()
            .filter(
                permission::Column::Id.in_subquery(
                    Query::select()
                        .column(permission_role::Column::PermissionId)
                        .from(permission_role::Entity)
                        .and_where(permission_role::Column::RoleId.eq(role_id))
                        .to_owned(),
                ),
            )
            .order_by_asc(permission::Column::Module)
            .order_by_asc(permission::Column::Action)
            .all(&self.db)
            .await?;
        Ok(permissions.into_iter().map(PermissionRecord::from).collect())
    }
}
