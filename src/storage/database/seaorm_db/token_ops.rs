use crate::storage::types::ResetTicket;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::debug;

use super::super::entities::{self, admin, admin_password_reset};
use super::types::SeaOrmDatabase;

impl SeaOrmDatabase {
    /// Store a password reset ticket
    pub async fn store_reset_ticket(&self, ticket: ResetTicket) -> Result<()> {
        debug!("Storing password reset ticket");

        let model = admin_password_reset::ActiveModel {
            id: NotSet,
            email: Set(ticket.email),
            token_hash: Set(ticket.token_hash),
            expires_at: Set(ticket.expires_at.fixed_offset()),
            used: Set(false),
            created_at: Set(Utc::now().fixed_offset()),
        };

        entities::AdminPasswordReset::insert(model)
            .exec(&self.db)
            .await?;
        Ok(())
    }

    /// Consume a ticket and set the password in one transaction
    ///
    /// The ticket is claimed with a conditional update, so of two concurrent
    /// redemptions at most one sees a row affected.
    pub async fn consume_reset_ticket(
        &self,
        email: &str,
        token_hash: &str,
        password_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        debug!("Redeeming password reset ticket");
        let now = now.fixed_offset();

        let txn = self.db.begin().await?;

        let claimed = entities::AdminPasswordReset::update_many()
            .col_expr(admin_password_reset::Column::Used, Expr::value(true))
            .filter(admin_password_reset::Column::Email.eq(email))
            .filter(admin_password_reset::Column::TokenHash.eq(token_hash))
            .filter(admin_password_reset::Column::Used.eq(false))
            .filter(admin_password_reset::Column::ExpiresAt.gt(now))
            .exec(&txn)
            .await?;

        if claimed.rows_affected != 1 {
            txn.rollback().await?;
            return Ok(false);
        }

        let updated = entities::Admin::update_many()
            .col_expr(admin::Column::PasswordHash, Expr::value(password_hash))
            .col_expr(admin::Column::UpdatedAt, Expr::value(now))
            .filter(admin::Column::Email.eq(email))
            .exec(&txn)
            .await?;

        if updated.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        txn.commit().await?;
        Ok(true)
    }

    /// Delete tickets that expired before `now`
    pub async fn purge_expired_tickets(&self, now: DateTime<Utc>) -> Result<u64> {
        let result = entities::AdminPasswordReset::delete_many()
            .filter(admin_password_reset::Column::ExpiresAt.lt(now.fixed_offset()))
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected)
    }
}
