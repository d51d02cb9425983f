//! Authorization guard

use super::types::{AccessDecision, Capability};
use crate::auth::AuthenticatedAdmin;
use crate::storage::CredentialStore;
use crate::utils::error::{AdminError, Result};
use crate::utils::logging::AUDIT_TARGET;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Decide whether `admin` may exercise `capability`
///
/// Super admins pass without a lookup, including for capabilities that have no
/// permission row. Everyone else needs a direct or role-inherited grant, which
/// is resolved with a single existence query against the current grant state.
///
/// A lookup that errors or exceeds `timeout` yields `AuthorizationCheckFailed`;
/// dropping the returned future never lets the request through.
pub async fn authorize<S>(
    store: &S,
    admin: &AuthenticatedAdmin,
    capability: &Capability,
    timeout: Duration,
) -> Result<AccessDecision>
where
    S: CredentialStore + ?Sized,
{
    if admin.is_super_admin {
        debug!(admin_id = admin.id, %capability, "Super admin bypass");
        return Ok(AccessDecision::SuperAdmin);
    }

    let granted =
        match tokio::time::timeout(timeout, store.has_permission(admin.id, capability)).await {
            Ok(Ok(granted)) => granted,
            Ok(Err(e)) => {
                error!(
                    admin_id = admin.id,
                    module = %capability.module,
                    action = %capability.action,
                    "Permission check failed: {}",
                    e
                );
                return Err(AdminError::authorization_check_failed(e.to_string()));
            }
            Err(_) => {
                error!(
                    admin_id = admin.id,
                    module = %capability.module,
                    action = %capability.action,
                    "Permission check timed out after {}ms",
                    timeout.as_millis()
                );
                return Err(AdminError::authorization_check_failed(format!(
                    "timed out after {}ms",
                    timeout.as_millis()
                )));
            }
        };

    if granted {
        debug!(admin_id = admin.id, %capability, "Permission granted");
        Ok(AccessDecision::Granted)
    } else {
        warn!(
            target: AUDIT_TARGET,
            admin_id = admin.id,
            module = %capability.module,
            action = %capability.action,
            "Permission denied for admin {}: {}",
            admin.id,
            capability
        );
        Err(AdminError::forbidden(&capability.module, &capability.action))
    }
}
