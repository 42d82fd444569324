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
                    .table(PartnerReview::Table)
                    .if_not_exists()
                    .col(pk_auto(PartnerReview::Id))
                    .col(integer(PartnerReview::PartnerId))
                    .col(integer(PartnerReview::ClientId))
                    .col(integer_null(PartnerReview::OrderId))
                    .col(integer(PartnerReview::Rating))
                    .col(text_null(PartnerReview::Comment))
                    .col(timestamp_with_time_zone(PartnerReview::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_partner_review_partner_id")
                            .from(PartnerReview::Table, PartnerReview::PartnerId)
                            .to(Partner::Table, Partner::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_partner_review_client_id")
                            .from(PartnerReview::Table, PartnerReview::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PartnerReview::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PartnerReview {
    Table,
    Id,
    PartnerId,
    ClientId,
    OrderId,
    Rating,
    Comment,
    CreatedAt,
}
