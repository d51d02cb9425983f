//! Default capability catalogue and bootstrap super admin

use super::types::{AdminQuery, AdminStatus, NewAdmin, NewPermission, NewRole};
use super::AdminStore;
use crate::auth::rbac::Capability;
use crate::utils::error::Result;
use tracing::info;

/// Modules covered by the default catalogue
pub const DEFAULT_MODULES: [&str; 5] = ["admin", "role", "permission", "user", "property"];

/// Actions granted per module in the default catalogue
pub const DEFAULT_ACTIONS: [&str; 4] = ["view", "create", "edit", "delete"];

pub const SUPER_ADMIN_ROLE_SLUG: &str = "super-admin";

pub const BOOTSTRAP_ADMIN_EMAIL: &str = "admin@example.com";

/// What a seeding run inserted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub permissions_created: usize,
    pub role_created: bool,
    pub admin_created: bool,
}

/// Every capability of the default catalogue
pub fn default_capabilities() -> impl Iterator<Item = Capability> {
    DEFAULT_MODULES.into_iter().flat_map(|module| {
        DEFAULT_ACTIONS
            .into_iter()
            .map(move |action| Capability::new(module, action))
    })
}

/// Insert whatever part of the defaults is missing
///
/// Running it twice is a no-op the second time. The bootstrap admin is only
/// created while the admin table is empty.
pub async fn seed_defaults(store: &dyn AdminStore, password_hash: &str) -> Result<SeedReport> {
    let mut report = SeedReport::default();

    for capability in default_capabilities() {
        let name = capability.to_string();
        if store.permission_exists(&name, &capability).await? {
            continue;
        }
        store
            .create_permission(NewPermission {
                description: Some(format!(
                    "Can {} {} records",
                    capability.action, capability.module
                )),
                name,
                module: capability.module,
                action: capability.action,
            })
            .await?;
        report.permissions_created += 1;
    }

    if !store.role_slug_exists(SUPER_ADMIN_ROLE_SLUG).await? {
        let permission_ids = store
            .list_permissions()
            .await?
            .into_iter()
            .map(|p| p.id)
            .collect();
        store
            .create_role(NewRole {
                name: "Super Admin".to_string(),
                slug: SUPER_ADMIN_ROLE_SLUG.to_string(),
                description: Some("Full access to every module".to_string()),
                permission_ids,
            })
            .await?;
        report.role_created = true;
    }

    let existing = store
        .list_admins(&AdminQuery {
            page: 1,
            limit: 1,
            search: None,
        })
        .await?;

    if existing.total == 0 {
        let role_ids = store
            .list_roles()
            .await?
            .into_iter()
            .filter(|role| role.slug == SUPER_ADMIN_ROLE_SLUG)
            .map(|role| role.id)
            .collect();

        store
            .create_admin(NewAdmin {
                name: "Super Admin".to_string(),
                email: BOOTSTRAP_ADMIN_EMAIL.to_string(),
                password_hash: password_hash.to_string(),
                status: AdminStatus::Active,
                is_super_admin: true,
                role_ids,
                permission_ids: Vec::new(),
            })
            .await?;
        report.admin_created = true;
    }

    info!(
        permissions = report.permissions_created,
        role = report.role_created,
        admin = report.admin_created,
        "Seeding finished"
    );
    Ok(report)
}
