use sea_orm_migration::{prelude::*, schema::*};

use super::m20251018_000002_create_partner_table::Partner;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PartnerLocation::Table)
                    .if_not_exists()
                    .col(pk_auto(PartnerLocation::Id))
                    .col(integer(PartnerLocation::PartnerId))
                    .col(string(PartnerLocation::City))
                    .col(string_null(PartnerLocation::State))
                    .col(string_null(PartnerLocation::Country))
                    .col(integer_null(PartnerLocation::ServiceRadius))
                    .col(double_null(PartnerLocation::TravelCharges))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_partner_location_partner_id")
                            .from(PartnerLocation::Table, PartnerLocation::PartnerId)
                            .to(Partner::Table, Partner::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_partner_location_city")
                    .table(PartnerLocation::Table)
                    .col(PartnerLocation::City)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PartnerLocation::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PartnerLocation {
    Table,
    Id,
    PartnerId,
    City,
    State,
    Country,
    ServiceRadius,
    TravelCharges,
}
