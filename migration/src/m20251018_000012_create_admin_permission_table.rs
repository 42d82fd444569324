use sea_orm_migration::{prelude::*, schema::*};

use super::m20251018_000011_create_admin_table::Admin;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AdminPermission::Table)
                    .if_not_exists()
                    .col(pk_auto(AdminPermission::Id))
                    .col(integer(AdminPermission::AdminId))
                    .col(string(AdminPermission::Module))
                    .col(string(AdminPermission::Action))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_admin_permission_admin_id")
                            .from(AdminPermission::Table, AdminPermission::AdminId)
                            .to(Admin::Table, Admin::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_admin_permission_unique")
                            .col(AdminPermission::AdminId)
                            .col(AdminPermission::Module)
                            .col(AdminPermission::Action),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AdminPermission::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum AdminPermission {
    Table,
    Id,
    AdminId,
    Module,
    Action,
}
