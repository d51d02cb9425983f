// Module declarations
mod admin_ops;
mod connection;
mod grant_ops;
mod permission_ops;
mod role_ops;
mod store;
mod token_ops;
mod types;

// Re-export public types
pub use types::{DatabaseBackendType, SeaOrmDatabase};
