use crate::storage::types::PermissionRecord;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Permission database model; (module, action) is unique
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "permissions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name, conventionally `module.action`
    #[sea_orm(unique)]
    pub name: String,

    pub module: String,

    pub action: String,

    pub description: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::permission_role::Entity")]
    PermissionRole,

    #[sea_orm(has_many = "super::permission_admin::Entity")]
    PermissionAdmin,
}

impl Related<super::permission_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PermissionRole.def()
    }
}

impl Related<super::permission_admin::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PermissionAdmin.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for PermissionRecord {
    fn from(model: Model) -> Self {
        PermissionRecord {
            id: model.id,
            name: model.name,
            module: model.module,
            action: model.action,
            description: model.description,
        }
    }
}
