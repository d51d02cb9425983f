use crate::storage::types::{AdminRecord, AdminStatus};
use chrono::Utc;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Admin database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "admins")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    /// Email address (unique, login identifier)
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2 PHC string
    pub password_hash: String,

    /// `active` or `inactive`
    pub status: String,

    pub is_super_admin: bool,

    /// Consecutive failed logins since the last success
    pub login_attempts: i32,

    pub last_login_at: Option<DateTimeWithTimeZone>,

    pub last_login_ip: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::role_admin::Entity")]
    RoleAdmin,

    #[sea_orm(has_many = "super::permission_admin::Entity")]
    PermissionAdmin,
}

impl Related<super::role_admin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoleAdmin.def()
    }
}

impl Related<super::permission_admin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PermissionAdmin.def()
    }
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        super::role_admin::Relation::Role.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::role_admin::Relation::Admin.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Convert the row into a store record
    ///
    /// An unrecognised status string is read as inactive so the account cannot
    /// authenticate.
    pub fn to_record(&self) -> AdminRecord {
        AdminRecord {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            status: self.status.parse().unwrap_or(AdminStatus::Inactive),
            is_super_admin: self.is_super_admin,
            login_attempts: self.login_attempts,
            last_login_at: self.last_login_at.map(|at| at.with_timezone(&Utc)),
            last_login_ip: self.last_login_ip.clone(),
            created_at: self.created_at.with_timezone(&Utc),
        }
    }
}
