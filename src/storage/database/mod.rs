//! Database storage implementation using SeaORM
//!
//! Tables: `admins`, `roles`, `permissions`, the three grant tables
//! (`role_admin`, `permission_role`, `permission_admin`) and
//! `admin_password_resets`.

/// Database entities module
pub mod entities;
/// Database migration module
pub mod migration;
/// SeaORM database implementation module
pub mod seaorm_db;

// Re-export the main database interface
pub use seaorm_db::DatabaseBackendType;
pub use seaorm_db::SeaOrmDatabase as Database;
