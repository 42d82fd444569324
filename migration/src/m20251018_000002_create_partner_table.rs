use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Partner::Table)
                    .if_not_exists()
                    .col(pk_auto(Partner::Id))
                    .col(string_uniq(Partner::PartnerCode))
                    .col(string_null(Partner::IdentityUid).unique_key())
                    .col(string_uniq(Partner::Username))
                    .col(string(Partner::CompanyName))
                    .col(string_uniq(Partner::Email))
                    .col(string_null(Partner::PasswordHash))
                    .col(string(Partner::PhoneNo))
                    .col(string_null(Partner::ProfilePicUrl))
                    .col(string_null(Partner::BannerUrl))
                    .col(string_null(Partner::Street))
                    .col(string_null(Partner::City))
                    .col(string_null(Partner::State))
                    .col(string_null(Partner::Country))
                    .col(string_null(Partner::ZipCode))
                    .col(integer_null(Partner::YearsOfExperience))
                    .col(string(Partner::PlanType).default("free"))
                    .col(string(Partner::PartnerType).default("individual"))
                    .col(double_null(Partner::PricePerDay))
                    .col(double(Partner::RatingAverage).default(0.0))
                    .col(integer(Partner::RatingTotal).default(0))
                    .col(integer(Partner::RatingFive).default(0))
                    .col(integer(Partner::RatingFour).default(0))
                    .col(integer(Partner::RatingThree).default(0))
                    .col(integer(Partner::RatingTwo).default(0))
                    .col(integer(Partner::RatingOne).default(0))
                    .col(boolean(Partner::Verified).default(false))
                    .col(json(Partner::AvailabilitySchedule))
                    .col(string_null(Partner::Timezone))
                    .col(double(Partner::TotalRevenue).default(0.0))
                    .col(json(Partner::Transactions))
                    .col(boolean(Partner::IsActive).default(true))
                    .col(timestamp_with_time_zone_null(Partner::LastLogin))
                    .col(timestamp_with_time_zone(Partner::CreatedAt))
                    .col(timestamp_with_time_zone(Partner::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_partner_rating_average")
                    .table(Partner::Table)
                    .col(Partner::RatingAverage)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Partner::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Partner {
    Table,
    Id,
    PartnerCode,
    IdentityUid,
    Username,
    CompanyName,
    Email,
    PasswordHash,
    PhoneNo,
    ProfilePicUrl,
    BannerUrl,
    Street,
    City,
    State,
    Country,
    ZipCode,
    YearsOfExperience,
    PlanType,
    PartnerType,
    PricePerDay,
    RatingAverage,
    RatingTotal,
    RatingFive,
    RatingFour,
    RatingThree,
    RatingTwo,
    RatingOne,
    Verified,
    AvailabilitySchedule,
    Timezone,
    TotalRevenue,
    Transactions,
    IsActive,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}
