/// Admin entity module
pub mod admin;
/// Password reset ticket entity module
pub mod admin_password_reset;
/// Direct admin grant entity module
pub mod permission_admin;
/// Permission entity module
pub mod permission;
/// Role grant entity module
pub mod permission_role;
/// Role entity module
pub mod role;
/// Role assignment entity module
pub mod role_admin;

pub use admin::Entity as Admin;
pub use admin_password_reset::Entity as AdminPasswordReset;
pub use permission::Entity as Permission;
pub use permission_admin::Entity as PermissionAdmin;
pub use permission_role::Entity as PermissionRole;
pub use role::Entity as Role;
pub use role_admin::Entity as RoleAdmin;
