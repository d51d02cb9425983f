use crate::storage::types::{RoleRecord, RoleSummary};
use chrono::Utc;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Role database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "roles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub name: String,

    /// URL-safe identifier derived from the name
    #[sea_orm(unique)]
    pub slug: String,

    pub description: Option<String>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::role_admin::Entity")]
    RoleAdmin,

    #[sea_orm(has_many = "super::permission_role::Entity")]
    PermissionRole,
}

impl Related<super::role_admin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoleAdmin.def()
    }
}

impl Related<super::permission_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PermissionRole.def()
    }
}

impl Related<super::permission::Entity> for Entity {
    fn to() -> RelationDef {
        super::permission_role::Relation::Permission.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::permission_role::Relation::Role.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn to_record(&self) -> RoleRecord {
        RoleRecord {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
            description: self.description.clone(),
            created_at: self.created_at.with_timezone(&Utc),
        }
    }

    pub fn to_summary(&self) -> RoleSummary {
        RoleSummary {
            id: self.id,
            name: self.name.clone(),
            slug: self.slug.clone(),
        }
    }
}
