//! Replacement of the grant tables that link admins, roles and permissions

use crate::utils::error::Result;
use sea_orm::*;
use std::collections::BTreeSet;

use super::super::entities::{self, permission_admin, permission_role, role_admin};
use super::types::write_error;

/// Replace the roles assigned to an admin
pub(super) async fn replace_admin_roles<C: ConnectionTrait>(
    conn: &C,
    admin_id: i32,
    role_ids: &[i32],
) -> Result<()> {
    entities::RoleAdmin::delete_many()
        .filter(role_admin::Column::AdminId.eq(admin_id))
        .exec(conn)
        .await?;

    let rows: Vec<role_admin::ActiveModel> = distinct(role_ids)
        .map(|role_id| role_admin::ActiveModel {
            admin_id: Set(admin_id),
            role_id: Set(role_id),
        })
        .collect();

    // insert_many rejects an empty batch
    if !rows.is_empty() {
        entities::RoleAdmin::insert_many(rows)
            .exec_without_returning(conn)
            .await
            .map_err(|e| write_error(e, "Role already assigned"))?;
    }
    Ok(())
}

/// Replace the permissions granted directly to an admin
pub(super) async fn replace_admin_permissions<C: ConnectionTrait>(
    conn: &C,
    admin_id: i32,
    permission_ids: &[i32],
) -> Result<()> {
    entities::PermissionAdmin::delete_many()
        .filter(permission_admin::Column::AdminId.eq(admin_id))
        .exec(conn)
        .await?;

    let rows: Vec<permission_admin::ActiveModel> = distinct(permission_ids)
        .map(|permission_id| permission_admin::ActiveModel {
            admin_id: Set(admin_id),
            permission_id: Set(permission_id),
        })
        .collect();

    if !rows.is_empty() {
        entities::PermissionAdmin::insert_many(rows)
            .exec_without_returning(conn)
            .await
            .map_err(|e| write_error(e, "Permission already granted"))?;
    }
    Ok(())
}

/// Replace the permissions carried by a role
pub(super) async fn replace_role_permissions<C: ConnectionTrait>(
    conn: &C,
    role_id: i32,
    permission_ids: &[i32],
) -> Result<()> {
    entities::PermissionRole::delete_many()
        .filter(permission_role::Column::RoleId.eq(role_id))
        .exec(conn)
        .await?;

    let rows: Vec<permission_role::ActiveModel> = distinct(permission_ids)
        .map(|permission_id| permission_role::ActiveModel {
            role_id: Set(role_id),
            permission_id: Set(permission_id),
        })
        .collect();

    if !rows.is_empty() {
        entities::PermissionRole::insert_many(rows)
            .exec_without_returning(conn)
            .await
            .map_err(|e| write_error(e, "Permission already granted"))?;
    }
    Ok(())
}

fn distinct(ids: &[i32]) -> impl Iterator<Item = i32> {
    ids.iter().copied().collect::<BTreeSet<_>>().into_iter()
}
