//! Authentication guard

use super::jwt::JwtHandler;
use super::types::AuthenticatedAdmin;
use crate::storage::CredentialStore;
use crate::utils::error::{AdminError, Result};
use crate::utils::logging::AUDIT_TARGET;
use std::time::Duration;
use tracing::{debug, warn};

/// Resolve a bearer token to an active admin
///
/// The admin is looked up on every call, so deactivating or deleting an
/// account rejects its outstanding tokens immediately. A store failure is
/// propagated as a server error rather than reported as a bad token.
pub async fn authenticate<S>(
    jwt: &JwtHandler,
    store: &S,
    bearer: Option<&str>,
    timeout: Duration,
) -> Result<AuthenticatedAdmin>
where
    S: CredentialStore + ?Sized,
{
    let token = bearer.ok_or(AdminError::MissingToken)?;
    let claims = jwt.verify(token)?;

    let admin = tokio::time::timeout(timeout, store.find_active_admin_by_id(claims.admin_id))
        .await
        .map_err(|_| AdminError::timeout("Admin lookup timed out"))??;

    match admin {
        Some(admin) => {
            debug!(admin_id = admin.id, "Request authenticated");
            Ok(admin.into())
        }
        None => {
            warn!(
                target: AUDIT_TARGET,
                admin_id = claims.admin_id,
                "Token presented for a missing or inactive admin"
            );
            Err(AdminError::invalid_token("Admin not found or inactive"))
        }
    }
}
