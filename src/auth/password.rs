//! Forgot/reset password flow

use super::system::AuthSystem;
use crate::services::PasswordResetNotice;
use crate::storage::{AdminRecord, ResetTicket};
use crate::utils::auth::{generate_reset_token, hash_password, hash_reset_token};
use crate::utils::error::{AdminError, Result};
use crate::utils::logging::AUDIT_TARGET;
use crate::utils::validation::validate_password;
use chrono::Utc;
use tracing::{error, info, warn};

impl AuthSystem {
    /// Start a password reset
    ///
    /// Always succeeds from the caller's point of view so the response never
    /// reveals whether the email belongs to an admin. A ticket is only stored
    /// and mailed for an active admin.
    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        let email = email.trim();

        match self.store.find_active_admin_by_email(email).await {
            Ok(Some(credentials)) => {
                if let Err(e) = self.issue_reset_ticket(&credentials.admin).await {
                    error!(admin_id = credentials.admin.id, "Failed to issue reset ticket: {}", e);
                }
            }
            Ok(None) => {
                warn!(target: AUDIT_TARGET, %email, "Password reset requested for unknown email");
            }
            Err(e) => {
                error!("Password reset lookup failed: {}", e);
            }
        }

        Ok(())
    }

    async fn issue_reset_ticket(&self, admin: &AdminRecord) -> Result<()> {
        let token = generate_reset_token();
        let expires_at = Utc::now() + self.config.reset_token_ttl();

        self.store
            .create_reset_ticket(ResetTicket {
                email: admin.email.clone(),
                token_hash: hash_reset_token(&token),
                expires_at,
            })
            .await?;

        info!(
            target: AUDIT_TARGET,
            admin_id = admin.id,
            email = %admin.email,
            %expires_at,
            "Password reset ticket issued"
        );

        let notice = PasswordResetNotice::new(
            &self.config.reset_link_base,
            &admin.name,
            &admin.email,
            &token,
            expires_at,
        )?;

        // The ticket stays valid even if delivery fails; the admin can ask again.
        if let Err(e) = self.mailer.send_password_reset(&notice).await {
            error!(admin_id = admin.id, "Password reset mail failed: {}", e);
        }
        Ok(())
    }

    /// Redeem a reset ticket and set a new password
    ///
    /// The ticket check, the claim and the password change happen in one store
    /// transaction; a replayed or expired ticket yields `InvalidOrExpiredToken`.
    pub async fn reset_password(&self, email: &str, token: &str, new_password: &str) -> Result<()> {
        let email = email.trim();
        validate_password(new_password, self.config.password_min_length)?;
        let password_hash = hash_password(new_password)?;

        let redeemed = self
            .store
            .redeem_reset_ticket(email, &hash_reset_token(token), &password_hash, Utc::now())
            .await?;

        if !redeemed {
            warn!(target: AUDIT_TARGET, %email, "Invalid reset token attempt");
            return Err(AdminError::InvalidOrExpiredToken);
        }

        info!(target: AUDIT_TARGET, %email, "Password reset redeemed");
        Ok(())
    }
}
