use sea_orm_migration::prelude::*;

mod m20240101_000001_create_admins_table;
mod m20240101_000002_create_roles_and_permissions_tables;
mod m20240101_000003_create_grant_tables;
mod m20240101_000004_create_admin_password_resets_table;

/// Database migrator for SeaORM
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_admins_table::Migration),
            Box::new(m20240101_000002_create_roles_and_permissions_tables::Migration),
            Box::new(m20240101_000003_create_grant_tables::Migration),
            Box::new(m20240101_000004_create_admin_password_resets_table::Migration),
        ]
    }
}
