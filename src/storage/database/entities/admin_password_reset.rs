use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Password reset ticket database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "admin_password_resets")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Email the ticket was issued for
    pub email: String,

    /// SHA-256 hex digest of the mailed token
    #[sea_orm(unique)]
    pub token_hash: String,

    pub expires_at: DateTimeWithTimeZone,

    /// Set once the ticket has been redeemed
    pub used: bool,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
