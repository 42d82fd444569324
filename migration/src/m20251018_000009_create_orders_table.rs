use sea_orm_migration::{prelude::*, schema::*};

use super::m20251018_000001_create_client_table::Client;
use super::m20251018_000002_create_partner_table::Partner;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Order::Table)
                    .if_not_exists()
                    .col(pk_auto(Order::Id))
                    .col(string_uniq(Order::OrderCode))
                    .col(string(Order::OrderName))
                    .col(integer(Order::ClientId))
                    .col(integer(Order::PartnerId))
                    .col(string_null(Order::EventType))
                    .col(string_null(Order::EventName))
                    .col(text_null(Order::EventDescription))
                    .col(integer_null(Order::GuestCount))
                    .col(timestamp_with_time_zone(Order::EventDateTime))
                    .col(timestamp_with_time_zone(Order::BookingDateTime))
                    .col(string_null(Order::Venue))
                    .col(string_null(Order::City))
                    .col(string_null(Order::State))
                    .col(string_null(Order::Country))
                    .col(double(Order::BasePrice))
                    .col(json(Order::AdditionalCharges))
                    .col(double(Order::DiscountAmount).default(0.0))
                    .col(string_null(Order::DiscountReason))
                    .col(double(Order::TaxAmount).default(0.0))
                    .col(double_null(Order::TaxPercentage))
                    .col(double(Order::TotalAmount))
                    .col(string(Order::Status).default("pending"))
                    .col(string_null(Order::CurrentStage))
                    .col(integer(Order::ProgressPercentage).default(0))
                    .col(string(Order::PaymentStatus).default("pending"))
                    .col(text_null(Order::SpecialInstructions))
                    .col(string(Order::DataProvidingMethod).default("cloud_storage"))
                    .col(timestamp_with_time_zone(Order::CreatedAt))
                    .col(timestamp_with_time_zone(Order::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_client_id")
                            .from(Order::Table, Order::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_orders_partner_id")
                            .from(Order::Table, Order::PartnerId)
                            .to(Partner::Table, Partner::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_orders_client_id", Order::ClientId),
            ("idx_orders_partner_id", Order::PartnerId),
            ("idx_orders_status", Order::Status),
            ("idx_orders_event_date_time", Order::EventDateTime),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Order::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Order::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Order {
    #[sea_orm(iden = "orders")]
    Table,
    Id,
    OrderCode,
    OrderName,
    ClientId,
    PartnerId,
    EventType,
    EventName,
    EventDescription,
    GuestCount,
    EventDateTime,
    BookingDateTime,
    Venue,
    City,
    State,
    Country,
    BasePrice,
    AdditionalCharges,
    DiscountAmount,
    DiscountReason,
    TaxAmount,
    TaxPercentage,
    TotalAmount,
    Status,
    CurrentStage,
    ProgressPercentage,
    PaymentStatus,
    SpecialInstructions,
    DataProvidingMethod,
    CreatedAt,
    UpdatedAt,
}
