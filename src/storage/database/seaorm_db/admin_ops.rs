use crate::storage::types::*;
use crate::utils::error::Result;
use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, admin};
use super::grant_ops::{replace_admin_permissions, replace_admin_roles};
use super::types::{SeaOrmDatabase, write_error};

impl SeaOrmDatabase {
    /// Find an admin by id regardless of status
    pub async fn find_admin(&self, id: i32) -> Result<Option<AdminRecord>> {
        debug!("Finding admin by ID: {}", id);

        let model = entities::Admin::find_by_id(id).one(&self.db).await?;
        Ok(model.map(|model| model.to_record()))
    }

    /// Find an active admin by id
    pub async fn find_active_admin(&self, id: i32) -> Result<Option<AdminRecord>> {
        let model = entities::Admin::find_by_id(id)
            .filter(admin::Column::Status.eq(AdminStatus::Active.as_str()))
            .one(&self.db)
            .await?;

        Ok(model.map(|model| model.to_record()))
    }

    /// Find an active admin by email, together with the password hash
    pub async fn find_active_admin_credentials(
        &self,
        email: &str,
    ) -> Result<Option<AdminCredentials>> {
        debug!("Finding active admin by email");

        let model = entities::Admin::find()
            .filter(admin::Column::Email.eq(email))
            .filter(admin::Column::Status.eq(AdminStatus::Active.as_str()))
            .one(&self.db)
            .await?;

        Ok(model.map(|model| AdminCredentials {
            admin: model.to_record(),
            password_hash: model.password_hash,
        }))
    }

    pub async fn admin_email_exists(&self, email: &str) -> Result<bool> {
        let count = entities::Admin::find()
            .filter(admin::Column::Email.eq(email))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// Newest first, optionally filtered by a case-insensitive name/email match
    pub async fn list_admin_page(&self, query: &AdminQuery) -> Result<AdminPage> {
        let mut select = entities::Admin::find();

        let offset = query.offset()?;

        if let Some(pattern) = query.search_pattern() {
            let like = || LikeExpr::new(pattern.as_str()).escape(LIKE_ESCAPE);
            select = select.filter(
                Condition::any()
                    .add(Expr::expr(Func::lower(Expr::col(admin::Column::Name))).like(like()))
                    .add(Expr::expr(Func::lower(Expr::col(admin::Column::Email))).like(like())),
            );
        }

        let total = select.clone().count(&self.db).await?;
        let admins = select
            .order_by_desc(admin::Column::Id)
            .offset(offset)
            .limit(query.limit)
            .all(&self.db)
            .await?
            .iter()
            .map(admin::Model::to_record)
            .collect();

        Ok(AdminPage { admins, total })
    }

    /// Insert an admin and its assignments in one transaction
    pub async fn insert_admin(&self, new_admin: NewAdmin) -> Result<i32> {
        debug!("Creating admin: {}", new_admin.email);
        let now = Utc::now().fixed_offset();

        let txn = self.db.begin().await?;

        let model = admin::ActiveModel {
            id: NotSet,
            name: Set(new_admin.name),
            email: Set(new_admin.email),
            password_hash: Set(new_admin.password_hash),
            status: Set(new_admin.status.as_str().to_string()),
            is_super_admin: Set(new_admin.is_super_admin),
            login_attempts: Set(0),
            last_login_at: Set(None),
            last_login_ip: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let id = entities::Admin::insert(model)
            .exec(&txn)
            .await
            .map_err(|e| write_error(e, "Email already exists"))?
            .last_insert_id;

        replace_admin_roles(&txn, id, &new_admin.role_ids).await?;
        replace_admin_permissions(&txn, id, &new_admin.permission_ids).await?;

        txn.commit().await?;
        Ok(id)
    }

    /// Apply a patch in one transaction; `false` if the admin does not exist
    pub async fn patch_admin(&self, id: i32, patch: AdminPatch) -> Result<bool> {
        debug!("Updating admin: {}", id);
        let txn = self.db.begin().await?;

        let Some(model) = entities::Admin::find_by_id(id).one(&txn).await? else {
            txn.rollback().await?;
            return Ok(false);
        };

        let mut active: admin::ActiveModel = model.into();
        if let Some(name) = patch.name {
            active.name = Set(name);
        }
        if let Some(status) = patch.status {
            active.status = Set(status.as_str().to_string());
        }
        if let Some(is_super_admin) = patch.is_super_admin {
            active.is_super_admin = Set(is_super_admin);
        }
        if let Some(password_hash) = patch.password_hash {
            active.password_hash = Set(password_hash);
        }
        active.updated_at = Set(Utc::now().fixed_offset());
        active.update(&txn).await?;

        if let Some(role_ids) = patch.role_ids {
            replace_admin_roles(&txn, id, &role_ids).await?;
        }
        if let Some(permission_ids) = patch.permission_ids {
            replace_admin_permissions(&txn, id, &permission_ids).await?;
        }

        txn.commit().await?;
        Ok(true)
    }

    /// Delete an admin with its assignments; `false` if absent
    pub async fn remove_admin(&self, id: i32) -> Result<bool> {
        debug!("Deleting admin: {}", id);
        let txn = self.db.begin().await?;

        replace_admin_roles(&txn, id, &[]).await?;
        replace_admin_permissions(&txn, id, &[]).await?;
        let result = entities::Admin::delete_by_id(id).exec(&txn).await?;

        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }
        txn.commit().await?;
        Ok(true)
    }

    pub async fn increment_login_attempts(&self, id: i32) -> Result<()> {
        entities::Admin::update_many()
            .col_expr(
                admin::Column::LoginAttempts,
                Expr::col(admin::Column::LoginAttempts).add(1),
            )
            .filter(admin::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    pub async fn stamp_login(&self, id: i32, ip: Option<String>) -> Result<()> {
        let now = Utc::now().fixed_offset();
        entities::Admin::update_many()
            .col_expr(admin::Column::LoginAttempts, Expr::value(0))
            .col_expr(admin::Column::LastLoginAt, Expr::value(Some(now)))
            .col_expr(admin::Column::LastLoginIp, Expr::value(ip))
            .col_expr(admin::Column::UpdatedAt, Expr::value(now))
            .filter(admin::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(())
    }
}
