//! Email/password login

use super::jwt::TokenIdentity;
use super::system::AuthSystem;
use super::types::{AuthenticatedAdmin, LoginOutcome};
use crate::utils::auth::verify_password;
use crate::utils::error::{AdminError, Result};
use crate::utils::logging::AUDIT_TARGET;
use tracing::{info, warn};

impl AuthSystem {
    /// Check credentials and issue a session token
    ///
    /// Unknown and inactive emails fail without touching any counter. A wrong
    /// password increments the admin's attempt counter; a success resets it and
    /// stamps the login time and client address. The counter is bookkeeping
    /// only and never locks an account.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        ip: Option<String>,
    ) -> Result<LoginOutcome> {
        let email = email.trim();

        let Some(credentials) = self.store.find_active_admin_by_email(email).await? else {
            warn!(target: AUDIT_TARGET, %email, "Login attempt with unknown or inactive email");
            return Err(AdminError::InvalidCredentials);
        };
        let admin = credentials.admin;

        if !verify_password(password, &credentials.password_hash)? {
            self.store.record_failed_login(admin.id).await?;
            warn!(
                target: AUDIT_TARGET,
                admin_id = admin.id,
                %email,
                attempts = admin.login_attempts + 1,
                "Invalid password attempt"
            );
            return Err(AdminError::InvalidCredentials);
        }

        self.store
            .record_successful_login(admin.id, ip.clone())
            .await?;

        let access_token = self.jwt.issue(&TokenIdentity {
            admin_id: admin.id,
            email: admin.email.clone(),
            is_super_admin: admin.is_super_admin,
        })?;

        let admin_id = admin.id;
        let profile = self.profile(AuthenticatedAdmin::from(admin)).await?;

        info!(
            target: AUDIT_TARGET,
            admin_id,
            %email,
            ip = ip.as_deref().unwrap_or("unknown"),
            "Successful login"
        );

        Ok(LoginOutcome {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.jwt.expiration(),
            admin: profile,
        })
    }
}
