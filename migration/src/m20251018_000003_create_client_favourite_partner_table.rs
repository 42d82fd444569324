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
                    .table(ClientFavouritePartner::Table)
                    .if_not_exists()
                    .col(pk_auto(ClientFavouritePartner::Id))
                    .col(integer(ClientFavouritePartner::ClientId))
                    .col(integer(ClientFavouritePartner::PartnerId))
                    .col(timestamp_with_time_zone(ClientFavouritePartner::AddedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_favourite_partner_client_id")
                            .from(ClientFavouritePartner::Table, ClientFavouritePartner::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_favourite_partner_partner_id")
                            .from(ClientFavouritePartner::Table, ClientFavouritePartner::PartnerId)
                            .to(Partner::Table, Partner::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_client_favourite_partner_unique")
                            .col(ClientFavouritePartner::ClientId)
                            .col(ClientFavouritePartner::PartnerId),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ClientFavouritePartner::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ClientFavouritePartner {
    Table,
    Id,
    ClientId,
    PartnerId,
    AddedAt,
}
