use crate::auth::rbac::Capability;
use crate::storage::types::*;
use crate::utils::error::Result;
use chrono::Utc;
use sea_orm::sea_query::Query;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, permission, permission_admin, permission_role, role_admin};
use super::types::{SeaOrmDatabase, write_error};

/// Permissions reachable by an admin: direct grants plus grants of assigned roles
fn reachable_by(admin_id: i32) -> Condition {
    let direct = Query::select()
        .column(permission_admin::Column::PermissionId)
        .from(permission_admin::Entity)
        .and_where(permission_admin::Column::AdminId.eq(admin_id))
        .to_owned();

    let assigned_roles = Query::select()
        .column(role_admin::Column::RoleId)
        .from(role_admin::Entity)
        .and_where(role_admin::Column::AdminId.eq(admin_id))
        .to_owned();

    let inherited = Query::select()
        .column(permission_role::Column::PermissionId)
        .from(permission_role::Entity)
        .and_where(permission_role::Column::RoleId.in_subquery(assigned_roles))
        .to_owned();

    Condition::any()
        .add(permission::Column::Id.in_subquery(direct))
        .add(permission::Column::Id.in_subquery(inherited))
}

impl SeaOrmDatabase {
    /// Single-query existence check for one capability
    pub async fn admin_has_permission(&self, admin_id: i32, capability: &Capability) -> Result<bool> {
        debug!("Checking {} for admin {}", capability, admin_id);

        let found = entities::Permission::find()
            .select_only()
            .column(permission::Column::Id)
            .filter(permission::Column::Module.eq(capability.module.as_str()))
            .filter(permission::Column::Action.eq(capability.action.as_str()))
            .filter(reachable_by(admin_id))
            .into_tuple::<i32>()
            .one(&self.db)
            .await?;

        Ok(found.is_some())
    }

    /// Distinct effective permissions of an admin
    pub async fn permissions_of_admin(&self, admin_id: i32) -> Result<Vec<PermissionRecord>> {
        let permissions = entities::Permission::find()
            .filter(reachable_by(admin_id))
            .order_by_asc(permission::Column::Module)
            .order_by_asc(permission::Column::Action)
            .all(&self.db)
            .await?;
        Ok(permissions.into_iter().map(PermissionRecord::from).collect())
    }

    pub async fn insert_permission(&self, new_permission: NewPermission) -> Result<i32> {
        debug!("Creating permission: {}", new_permission.name);

        let model = permission::ActiveModel {
            id: NotSet,
            name: Set(new_permission.name),
            module: Set(new_permission.module),
            action: Set(new_permission.action),
            description: Set(new_permission.description),
            created_at: Set(Utc::now().fixed_offset()),
        };

        let result = entities::Permission::insert(model)
            .exec(&self.db)
            .await
            .map_err(|e| write_error(e, "Permission already exists"))?;
        Ok(result.last_insert_id)
    }

    /// Whether the name or the (module, action) pair is taken
    pub async fn permission_taken(&self, name: &str, capability: &Capability) -> Result<bool> {
        let count = entities::Permission::find()
            .filter(
                Condition::any()
                    .add(permission::Column::Name.eq(name))
                    .add(
                        Condition::all()
                            .add(permission::Column::Module.eq(capability.module.as_str()))
                            .add(permission::Column::Action.eq(capability.action.as_str())),
                    ),
            )
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    pub async fn all_permissions(&self) -> Result<Vec<PermissionRecord>> {
        let permissions = entities::Permission::find()
            .order_by_asc(permission::Column::Module)
            .order_by_asc(permission::Column::Action)
            .all(&self.db)
            .await?;
        Ok(permissions.into_iter().map(PermissionRecord::from).collect())
    }
}
