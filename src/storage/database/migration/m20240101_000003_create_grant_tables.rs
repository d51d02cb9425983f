use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoleAdmin::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(RoleAdmin::AdminId).integer().not_null())
                    .col(ColumnDef::new(RoleAdmin::RoleId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(RoleAdmin::AdminId)
                            .col(RoleAdmin::RoleId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_role_admin_admin_id")
                            .from(RoleAdmin::Table, RoleAdmin::AdminId)
                            .to(Admins::Table, Admins::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_role_admin_role_id")
                            .from(RoleAdmin::Table, RoleAdmin::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PermissionRole::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(PermissionRole::RoleId).integer().not_null())
                    .col(
                        ColumnDef::new(PermissionRole::PermissionId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(PermissionRole::RoleId)
                            .col(PermissionRole::PermissionId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permission_role_role_id")
                            .from(PermissionRole::Table, PermissionRole::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permission_role_permission_id")
                            .from(PermissionRole::Table, PermissionRole::PermissionId)
                            .to(Permissions::Table, Permissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PermissionAdmin::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PermissionAdmin::AdminId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PermissionAdmin::PermissionId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(PermissionAdmin::AdminId)
                            .col(PermissionAdmin::PermissionId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permission_admin_admin_id")
                            .from(PermissionAdmin::Table, PermissionAdmin::AdminId)
                            .to(Admins::Table, Admins::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_permission_admin_permission_id")
                            .from(PermissionAdmin::Table, PermissionAdmin::PermissionId)
                            .to(Permissions::Table, Permissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Reverse lookups used by the permission check
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_permission_role_permission_id")
                    .table(PermissionRole::Table)
                    .col(PermissionRole::PermissionId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_role_admin_role_id")
                    .table(RoleAdmin::Table)
                    .col(RoleAdmin::RoleId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PermissionAdmin::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PermissionRole::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(RoleAdmin::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RoleAdmin {
    Table,
    AdminId,
    RoleId,
}

#[derive(DeriveIden)]
enum PermissionRole {
    Table,
    RoleId,
    PermissionId,
}

#[derive(DeriveIden)]
enum PermissionAdmin {
    Table,
    AdminId,
    PermissionId,
}

#[derive(DeriveIden)]
enum Admins {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Permissions {
    Table,
    Id,
}
