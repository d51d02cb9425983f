use super::types::*;
use super::AdminManager;
use crate::auth::rbac::Capability;
use crate::storage::NewPermission;
use crate::utils::error::{AdminError, Result};
use crate::utils::validation::{validate_length, validate_max_length};
use tracing::info;

impl AdminManager {
    /// Register a new capability; returns the permission id
    pub async fn create_permission(&self, request: CreatePermissionRequest) -> Result<i32> {
        let name = request.name.trim().to_string();
        let module = request.module.trim().to_string();
        let action = request.action.trim().to_string();
        validate_length("Name", &name, 2, 150)?;
        validate_length("Module", &module, 2, 50)?;
        validate_length("Action", &action, 2, 50)?;
        validate_max_length("Description", request.description.as_deref(), 255)?;

        let capability = Capability::new(module, action);
        if self.store.permission_exists(&name, &capability).await? {
            return Err(AdminError::conflict("Permission already exists"));
        }

        let id = self
            .store
            .create_permission(NewPermission {
                name,
                module: capability.module.clone(),
                action: capability.action.clone(),
                description: request.description,
            })
            .await?;

        info!(permission_id = id, %capability, "Permission created successfully");
        Ok(id)
    }

    /// Every permission, ordered by module then action
    pub async fn list_permissions(&self) -> Result<Vec<PermissionDetails>> {
        Ok(self
            .store
            .list_permissions()
            .await?
            .into_iter()
            .map(PermissionDetails::from)
            .collect())
    }
}
