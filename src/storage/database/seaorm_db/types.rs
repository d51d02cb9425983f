use crate::utils::error::AdminError;
use sea_orm::{DatabaseConnection, DbErr, SqlErr};

/// SeaORM-based database implementation
#[derive(Debug, Clone)]
pub struct SeaOrmDatabase {
    pub(super) db: DatabaseConnection,
    /// Backend type indicator
    pub(super) backend_type: DatabaseBackendType,
}

/// Database backend type indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackendType {
    PostgreSQL,
    SQLite,
}

/// Map a failed write, turning constraint violations into client errors
pub(super) fn write_error(err: DbErr, conflict: &str) -> AdminError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AdminError::conflict(conflict),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            AdminError::validation("Unknown role or permission id")
        }
        _ => AdminError::Database(err),
    }
}
