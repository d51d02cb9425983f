//! Password reset mail
//!
//! Delivery is an external concern. [`LogMailer`] records what would be sent
//! without ever writing the token to the log.

use crate::config::EmailConfig;
use crate::utils::error::{AdminError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::info;
use url::Url;

/// A reset mail ready to be delivered
#[derive(Clone)]
pub struct PasswordResetNotice {
    pub name: String,
    pub email: String,
    pub token: String,
    pub link: Url,
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for PasswordResetNotice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordResetNotice")
            .field("email", &self.email)
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl PasswordResetNotice {
    /// Build the notice, with the link `{base}/reset-password?token=..&email=..`
    pub fn new(
        base: &str,
        name: &str,
        email: &str,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<Self> {
        let page = format!("{}/reset-password", base.trim_end_matches('/'));
        let link = Url::parse_with_params(&page, [("token", token), ("email", email)])
            .map_err(|e| AdminError::email(format!("Invalid reset link base: {}", e)))?;

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
            token: token.to_string(),
            link,
            expires_at,
        })
    }

    pub fn subject(&self) -> &'static str {
        "Password Reset Request"
    }

    pub fn text_body(&self) -> String {
        format!(
            "Hello {},\n\n\
             We received a request to reset your password. Open the link below to choose a new one:\n\n\
             {}\n\n\
             The link expires in 30 minutes and can be used once. \
             If you did not request a reset, ignore this message.\n",
            self.name, self.link
        )
    }

    pub fn html_body(&self) -> String {
        format!(
            "<p>Hello {},</p>\
             <p>We received a request to reset your password.</p>\
             <p><a href=\"{}\">Reset password</a></p>\
             <p>The link expires in 30 minutes and can be used once. \
             If you did not request a reset, ignore this message.</p>",
            html_escape(&self.name),
            self.link
        )
    }
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Sends password reset mails
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_password_reset(&self, notice: &PasswordResetNotice) -> Result<()>;
}

/// Mailer that only logs the delivery
#[derive(Debug, Clone)]
pub struct LogMailer {
    config: EmailConfig,
}

impl LogMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_password_reset(&self, notice: &PasswordResetNotice) -> Result<()> {
        if !self.config.enabled {
            info!(to = %notice.email, "Email delivery disabled, reset mail dropped");
            return Ok(());
        }

        info!(
            from = %self.config.from_address,
            to = %notice.email,
            subject = notice.subject(),
            expires_at = %notice.expires_at,
            "Password reset mail dispatched"
        );
        Ok(())
    }
}
