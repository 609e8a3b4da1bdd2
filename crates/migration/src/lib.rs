//! Migrator registering the care-record tables in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_client;
mod m20240101_000002_create_allowance;
mod m20240101_000003_create_power_of_attorney;
mod m20240101_000004_create_service_provider;
mod m20240101_000005_create_emergency_plan;
mod m20240101_000006_create_house_image;
mod m20240101_000007_create_role;
mod m20240101_000008_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_client::Migration),
            Box::new(m20240101_000002_create_allowance::Migration),
            Box::new(m20240101_000003_create_power_of_attorney::Migration),
            Box::new(m20240101_000004_create_service_provider::Migration),
            Box::new(m20240101_000005_create_emergency_plan::Migration),
            Box::new(m20240101_000006_create_house_image::Migration),
            Box::new(m20240101_000007_create_role::Migration),
            // Indexes should always be applied last
            Box::new(m20240101_000008_add_indexes::Migration),
        ]
    }
}
