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
                    .table(PartnerSpecialization::Table)
                    .if_not_exists()
                    .col(pk_auto(PartnerSpecialization::Id))
                    .col(integer(PartnerSpecialization::PartnerId))
                    .col(string(PartnerSpecialization::Name))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_partner_specialization_partner_id")
                            .from(PartnerSpecialization::Table, PartnerSpecialization::PartnerId)
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
            .drop_table(Table::drop().table(PartnerSpecialization::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PartnerSpecialization {
    Table,
    Id,
    PartnerId,
    Name,
}
