use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Admin::Table)
                    .if_not_exists()
                    .col(pk_auto(Admin::Id))
                    .col(string_uniq(Admin::AdminCode))
                    .col(string_null(Admin::IdentityUid).unique_key())
                    .col(string_uniq(Admin::Username))
                    .col(string_uniq(Admin::Email))
                    .col(string_null(Admin::PasswordHash))
                    .col(string_null(Admin::PhoneNo))
                    .col(string(Admin::Role).default("Admin"))
                    .col(json(Admin::Content))
                    .col(boolean(Admin::IsActive).default(true))
                    .col(timestamp_with_time_zone_null(Admin::LastLogin))
                    .col(timestamp_with_time_zone(Admin::CreatedAt))
                    .col(timestamp_with_time_zone(Admin::UpdatedAt))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Admin::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Admin {
    Table,
    Id,
    AdminCode,
    IdentityUid,
    Username,
    Email,
    PasswordHash,
    PhoneNo,
    Role,
    Content,
    IsActive,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}
