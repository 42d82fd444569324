use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Client::Table)
                    .if_not_exists()
                    .col(pk_auto(Client::Id))
                    .col(string_uniq(Client::ClientCode))
                    .col(string_null(Client::IdentityUid).unique_key())
                    .col(string_uniq(Client::Username))
                    .col(string_uniq(Client::Email))
                    .col(string_null(Client::PasswordHash))
                    .col(string(Client::PhoneNo))
                    .col(string_null(Client::ProfilePicUrl))
                    .col(string_null(Client::Street))
                    .col(string_null(Client::City))
                    .col(string_null(Client::State))
                    .col(string_null(Client::Country))
                    .col(string_null(Client::ZipCode))
                    .col(string(Client::PlanType).default("free"))
                    .col(timestamp_with_time_zone_null(Client::PlanStart))
                    .col(timestamp_with_time_zone_null(Client::PlanEnd))
                    .col(json(Client::Activities))
                    .col(boolean(Client::IsActive).default(true))
                    .col(boolean(Client::IsVerified).default(false))
                    .col(timestamp_with_time_zone_null(Client::LastLogin))
                    .col(timestamp_with_time_zone(Client::CreatedAt))
                    .col(timestamp_with_time_zone(Client::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_client_plan_type")
                    .table(Client::Table)
                    .col(Client::PlanType)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Client::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Client {
    Table,
    Id,
    ClientCode,
    IdentityUid,
    Username,
    Email,
    PasswordHash,
    PhoneNo,
    ProfilePicUrl,
    Street,
    City,
    State,
    Country,
    ZipCode,
    PlanType,
    PlanStart,
    PlanEnd,
    Activities,
    IsActive,
    IsVerified,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}
