pub use sea_orm_migration::prelude::*;

mod m20251018_000001_create_client_table;
mod m20251018_000002_create_partner_table;
mod m20251018_000003_create_client_favourite_partner_table;
mod m20251018_000004_create_partner_shoot_type_table;
mod m20251018_000005_create_partner_specialization_table;
mod m20251018_000006_create_partner_location_table;
mod m20251018_000007_create_partner_package_table;
mod m20251018_000008_create_partner_blackout_date_table;
mod m20251018_000009_create_orders_table;
mod m20251018_000010_create_partner_review_table;
mod m20251018_000011_create_admin_table;
mod m20251018_000012_create_admin_permission_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251018_000001_create_client_table::Migration),
            Box::new(m20251018_000002_create_partner_table::Migration),
            Box::new(m20251018_000003_create_client_favourite_partner_table::Migration),
            Box::new(m20251018_000004_create_partner_shoot_type_table::Migration),
            Box::new(m20251018_000005_create_partner_specialization_table::Migration),
            Box::new(m20251018_000006_create_partner_location_table::Migration),
            Box::new(m20251018_000007_create_partner_package_table::Migration),
            Box::new(m20251018_000008_create_partner_blackout_date_table::Migration),
            Box::new(m20251018_000009_create_orders_table::Migration),
            Box::new(m20251018_000010_create_partner_review_table::Migration),
            Box::new(m20251018_000011_create_admin_table::Migration),
            Box::new(m20251018_000012_create_admin_permission_table::Migration),
        ]
    }
}
