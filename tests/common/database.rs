//! Test database utilities
//!
//! Provides in-memory SQLite databases for testing without external dependencies.
//! Each test gets an isolated database instance using SeaORM.

use estate_admin::config::DatabaseConfig;
use estate_admin::storage::AdminStore;
use estate_admin::storage::database::Database;
use std::sync::Arc;

/// Test database wrapper providing isolated in-memory SQLite instances
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Arc<Database>,
}

impl TestDatabase {
    /// Create a new migrated in-memory database
    ///
    /// Each call creates a completely isolated database instance.
    pub async fn new() -> Self {
        let db = Database::new(&test_db_config())
            .await
            .expect("Failed to create in-memory test database");

        db.migrate()
            .await
            .expect("Failed to run database migrations");

        Self {
            inner: Arc::new(db),
        }
    }

    /// Get reference to the underlying database
    pub fn db(&self) -> &Database {
        &self.inner
    }

    /// The database as the store handle services expect
    pub fn store(&self) -> Arc<dyn AdminStore> {
        self.inner.clone()
    }
}

/// Helper to create a simple test database config
pub fn test_db_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        connection_timeout: 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_admin::storage::{AdminDirectory, CredentialStore};

    #[tokio::test]
    async fn test_database_creation() {
        let db = TestDatabase::new().await;
        assert!(db.db().health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_databases_are_isolated() {
        let first = TestDatabase::new().await;
        let second = TestDatabase::new().await;

        crate::common::fixtures::permission(first.db(), "user", "view").await;

        assert_eq!(first.db().list_permissions().await.unwrap().len(), 1);
        assert!(second.db().list_permissions().await.unwrap().is_empty());
    }
}
