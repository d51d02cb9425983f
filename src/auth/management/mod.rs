//! Admin, role and permission management
//!
//! Callers are expected to have passed the authorization guard for the
//! matching capability (`admin.create`, `role.view`, ...) before calling in.

mod admins;
mod permissions;
mod roles;
pub mod types;


pub use roles::slugify;
pub use types::*;

use crate::config::AuthConfig;
use crate::storage::AdminStore;
use std::sync::Arc;

/// Management operations over the admin store
#[derive(Clone)]
pub struct AdminManager {
    store: Arc<dyn AdminStore>,
    config: Arc<AuthConfig>,
}

impl AdminManager {
    pub fn new(store: Arc<dyn AdminStore>, config: Arc<AuthConfig>) -> Self {
        Self { store, config }
    }
}

impl std::fmt::Debug for AdminManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminManager").finish_non_exhaustive()
    }
}
