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
                    .table(PartnerBlackoutDate::Table)
                    .if_not_exists()
                    .col(pk_auto(PartnerBlackoutDate::Id))
                    .col(integer(PartnerBlackoutDate::PartnerId))
                    .col(date(PartnerBlackoutDate::Date))
                    .col(string_null(PartnerBlackoutDate::Reason))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_partner_blackout_date_partner_id")
                            .from(PartnerBlackoutDate::Table, PartnerBlackoutDate::PartnerId)
                            .to(Partner::Table, Partner::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_partner_blackout_date_unique")
                            .col(PartnerBlackoutDate::PartnerId)
                            .col(PartnerBlackoutDate::Date),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PartnerBlackoutDate::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PartnerBlackoutDate {
    Table,
    Id,
    PartnerId,
    Date,
    Reason,
}
