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
                    .table(PartnerShootType::Table)
                    .if_not_exists()
                    .col(pk_auto(PartnerShootType::Id))
                    .col(integer(PartnerShootType::PartnerId))
                    .col(string(PartnerShootType::ShootType))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_partner_shoot_type_partner_id")
                            .from(PartnerShootType::Table, PartnerShootType::PartnerId)
                            .to(Partner::Table, Partner::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .index(
                        Index::create()
                            .unique()
                            .name("idx_partner_shoot_type_unique")
                            .col(PartnerShootType::PartnerId)
                            .col(PartnerShootType::ShootType),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PartnerShootType::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PartnerShootType {
    Table,
    Id,
    PartnerId,
    ShootType,
}
