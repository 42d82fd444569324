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
                    .table(PartnerPackage::Table)
                    .if_not_exists()
                    .col(pk_auto(PartnerPackage::Id))
                    .col(integer(PartnerPackage::PartnerId))
                    .col(string(PartnerPackage::Name))
                    .col(text_null(PartnerPackage::Description))
                    .col(double(PartnerPackage::Price))
                    .col(string_null(PartnerPackage::Duration))
                    .col(json(PartnerPackage::Inclusions))
                    .col(boolean(PartnerPackage::IsActive).default(true))
                    .col(timestamp_with_time_zone(PartnerPackage::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_partner_package_partner_id")
                            .from(PartnerPackage::Table, PartnerPackage::PartnerId)
                            .to(Partner::Table, Partner::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PartnerPackage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PartnerPackage {
    Table,
    Id,
    PartnerId,
    Name,
    Description,
    Price,
    Duration,
    Inclusions,
    IsActive,
    CreatedAt,
}
