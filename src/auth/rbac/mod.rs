//! Role based access control
//!
//! Admins are authorized for a capability if they hold it directly, inherit it
//! through one of their roles, or carry the super-admin flag.

mod aggregate;
mod guard;
pub mod types;


pub use aggregate::{PermissionMap, group_permissions};
pub use guard::authorize;
pub use types::{AccessDecision, Capability};
