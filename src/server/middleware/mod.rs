//! HTTP middleware implementations
//!
//! - [`AuthMiddleware`] resolves the bearer token to an active admin
//! - [`RequirePermission`] checks one capability for that admin
//! - [`with_error_details`] adds internal error text to error bodies in development mode

mod auth;
mod helpers;
mod permission;


pub use auth::{AuthMiddleware, AuthMiddlewareService, authenticated_admin};
pub use helpers::{extract_bearer_token, is_public_route, with_error_details};
pub use permission::{RequirePermission, RequirePermissionService};
