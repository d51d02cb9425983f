//! Core authentication system implementation

use super::jwt::JwtHandler;
use super::management::AdminManager;
use super::rbac::{self, AccessDecision, Capability, group_permissions};
use super::types::{AdminProfile, AuthenticatedAdmin};
use crate::config::AuthConfig;
use crate::services::Mailer;
use crate::storage::AdminStore;
use crate::utils::error::{AdminError, Result};
use std::sync::Arc;
use tracing::info;

/// Main authentication system
#[derive(Clone)]
pub struct AuthSystem {
    /// Authentication configuration
    pub(super) config: Arc<AuthConfig>,
    /// Credential store handle
    pub(super) store: Arc<dyn AdminStore>,
    /// JWT handler
    pub(super) jwt: Arc<JwtHandler>,
    /// Reset mail delivery
    pub(super) mailer: Arc<dyn Mailer>,
}

impl std::fmt::Debug for AuthSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSystem")
            .field("config", &self.config)
            .field("jwt", &self.jwt)
            .finish_non_exhaustive()
    }
}

impl AuthSystem {
    /// Create a new authentication system
    pub fn new(
        config: &AuthConfig,
        store: Arc<dyn AdminStore>,
        mailer: Arc<dyn Mailer>,
    ) -> Result<Self> {
        info!("Initializing authentication system");

        let config = Arc::new(config.clone());
        let jwt = Arc::new(JwtHandler::new(&config)?);

        Ok(Self {
            config,
            store,
            jwt,
            mailer,
        })
    }

    /// Run the authentication guard on a bearer token
    pub async fn authenticate(&self, bearer: Option<&str>) -> Result<AuthenticatedAdmin> {
        super::authenticate(
            &self.jwt,
            self.store.as_ref(),
            bearer,
            self.config.permission_check_timeout(),
        )
        .await
    }

    /// Run the authorization guard for one capability
    pub async fn authorize(
        &self,
        admin: &AuthenticatedAdmin,
        capability: &Capability,
    ) -> Result<AccessDecision> {
        rbac::authorize(
            self.store.as_ref(),
            admin,
            capability,
            self.config.permission_check_timeout(),
        )
        .await
    }

    /// Profile of an active admin: roles plus grouped effective permissions
    pub async fn profile(&self, admin: AuthenticatedAdmin) -> Result<AdminProfile> {
        let roles = self.store.admin_roles(admin.id).await?;
        let permissions = group_permissions(self.store.admin_permissions(admin.id).await?);

        Ok(AdminProfile {
            id: admin.id,
            name: admin.name,
            email: admin.email,
            status: admin.status,
            is_super_admin: admin.is_super_admin,
            roles,
            permissions,
        })
    }

    /// Profile of the admin behind an id, if still active
    pub async fn profile_by_id(&self, admin_id: i32) -> Result<AdminProfile> {
        let admin = self
            .store
            .find_active_admin_by_id(admin_id)
            .await?
            .ok_or_else(|| AdminError::not_found("Admin not found"))?;
        self.profile(admin.into()).await
    }

    /// Management operations sharing this system's store and configuration
    pub fn management(&self) -> AdminManager {
        AdminManager::new(Arc::clone(&self.store), Arc::clone(&self.config))
    }

    /// Probe the store
    pub async fn health_check(&self) -> Result<()> {
        self.store.health_check().await
    }

    /// Get authentication configuration
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Get JWT handler
    pub fn jwt(&self) -> &JwtHandler {
        &self.jwt
    }

    /// Get the credential store
    pub fn store(&self) -> &Arc<dyn AdminStore> {
        &self.store
    }
}
