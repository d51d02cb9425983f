//! Authentication and authorization for the admin API
//!
//! Every protected request runs the authentication guard (token, then an
//! active-admin lookup) followed by the authorization guard for the capability
//! the route requires.

pub mod authentication;
pub mod jwt;
mod login;
pub mod management;
mod password;
pub mod rbac;
mod system;
pub mod types;


pub use authentication::authenticate;
pub use management::AdminManager;
pub use system::AuthSystem;
pub use types::{AdminProfile, AuthenticatedAdmin, LoginOutcome};
