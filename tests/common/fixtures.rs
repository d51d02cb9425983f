//! Test fixtures
//!
//! Small builders for the grant model plus an auth system wired to a store.

use async_trait::async_trait;
use estate_admin::auth::AuthSystem;
use estate_admin::config::AuthConfig;
use estate_admin::services::{Mailer, PasswordResetNotice};
use estate_admin::storage::{
    AdminDirectory, AdminStatus, AdminStore, NewAdmin, NewPermission, NewRole,
};
use estate_admin::utils::auth::hash_password;
use estate_admin::utils::error::Result;
use parking_lot::Mutex;
use std::sync::Arc;

/// Password every fixture admin is created with
pub const PASSWORD: &str = "fixture-password";

/// Mailer that keeps every notice for inspection
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<PasswordResetNotice>>,
}

impl RecordingMailer {
    /// Notices sent so far
    pub fn sent(&self) -> Vec<PasswordResetNotice> {
        self.sent.lock().clone()
    }

    /// Token of the most recent notice
    pub fn last_token(&self) -> Option<String> {
        self.sent.lock().last().map(|notice| notice.token.clone())
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send_password_reset(&self, notice: &PasswordResetNotice) -> Result<()> {
        self.sent.lock().push(notice.clone());
        Ok(())
    }
}

/// Auth configuration with a fixed secret
pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration_test_secret_that_is_long_enough".to_string(),
        ..AuthConfig::default()
    }
}

/// An auth system over `store` that records outgoing mail
pub fn auth_system(store: Arc<dyn AdminStore>) -> (AuthSystem, Arc<RecordingMailer>) {
    let mailer = Arc::new(RecordingMailer::default());
    let auth = AuthSystem::new(&auth_config(), store, mailer.clone())
        .expect("Failed to build auth system");
    (auth, mailer)
}

pub async fn permission<S: AdminDirectory + ?Sized>(store: &S, module: &str, action: &str) -> i32 {
    store
        .create_permission(NewPermission {
            name: format!("{}.{}", module, action),
            module: module.to_string(),
            action: action.to_string(),
            description: None,
        })
        .await
        .expect("Failed to create permission")
}

pub async fn role<S: AdminDirectory + ?Sized>(store: &S, name: &str, permission_ids: Vec<i32>) -> i32 {
    store
        .create_role(NewRole {
            name: name.to_string(),
            slug: name.to_lowercase().replace(' ', "-"),
            description: None,
            permission_ids,
        })
        .await
        .expect("Failed to create role")
}

/// Builder for admins; active, not super, no grants unless set
#[derive(Debug, Clone)]
pub struct AdminFactory {
    admin: NewAdmin,
}

impl AdminFactory {
    pub fn new(email: &str) -> Self {
        Self {
            admin: NewAdmin {
                name: "Fixture Admin".to_string(),
                email: email.to_string(),
                password_hash: hash_password(PASSWORD).expect("Failed to hash password"),
                status: AdminStatus::Active,
                is_super_admin: false,
                role_ids: vec![],
                permission_ids: vec![],
            },
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.admin.name = name.to_string();
        self
    }

    pub fn inactive(mut self) -> Self {
        self.admin.status = AdminStatus::Inactive;
        self
    }

    pub fn super_admin(mut self) -> Self {
        self.admin.is_super_admin = true;
        self
    }

    pub fn roles(mut self, role_ids: Vec<i32>) -> Self {
        self.admin.role_ids = role_ids;
        self
    }

    pub fn permissions(mut self, permission_ids: Vec<i32>) -> Self {
        self.admin.permission_ids = permission_ids;
        self
    }

    pub async fn create<S: AdminDirectory + ?Sized>(self, store: &S) -> i32 {
        store
            .create_admin(self.admin)
            .await
            .expect("Failed to create admin")
    }
}
