//! Lookup indexes for list-by-client queries.
//!
//! Every record table is read by `(client_id, deleted)`; owner codes already
//! carry a unique index from their column definition.
use sea_orm_migration::prelude::*;

use crate::m20240101_000002_create_allowance::Allowance;
use crate::m20240101_000003_create_power_of_attorney::PowerOfAttorney;
use crate::m20240101_000004_create_service_provider::ServiceProvider;
use crate::m20240101_000005_create_emergency_plan::EmergencyPlan;
use crate::m20240101_000006_create_house_image::HouseImage;
use crate::m20240101_000007_create_role::Role;

#[derive(DeriveMigrationName)]
pub struct Migration;

fn client_deleted_index<T, C>(name: &str, table: T, client: C, deleted: C) -> IndexCreateStatement
where
    T: IntoIden + 'static,
    C: IntoIden + 'static,
{
    Index::create()
        .name(name)
        .table(table)
        .col(client)
        .col(deleted)
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(client_deleted_index("idx_allowance_client_deleted", Allowance::Table, Allowance::ClientId, Allowance::Deleted))
            .await?;
        manager
            .create_index(client_deleted_index(
                "idx_power_of_attorney_client_deleted",
                PowerOfAttorney::Table,
                PowerOfAttorney::ClientId,
                PowerOfAttorney::Deleted,
            ))
            .await?;
        manager
            .create_index(client_deleted_index(
                "idx_service_provider_client_deleted",
                ServiceProvider::Table,
                ServiceProvider::ClientId,
                ServiceProvider::Deleted,
            ))
            .await?;
        manager
            .create_index(client_deleted_index(
                "idx_emergency_plan_client_deleted",
                EmergencyPlan::Table,
                EmergencyPlan::ClientId,
                EmergencyPlan::Deleted,
            ))
            .await?;
        manager
            .create_index(client_deleted_index(
                "idx_house_image_client_deleted",
                HouseImage::Table,
                HouseImage::ClientId,
                HouseImage::Deleted,
            ))
            .await?;
        manager
            .create_index(client_deleted_index("idx_role_client_deleted", Role::Table, Role::ClientId, Role::Deleted))
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_role_client_deleted").table(Role::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_house_image_client_deleted").table(HouseImage::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_emergency_plan_client_deleted").table(EmergencyPlan::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_service_provider_client_deleted").table(ServiceProvider::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_power_of_attorney_client_deleted").table(PowerOfAttorney::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_allowance_client_deleted").table(Allowance::Table).to_owned())
            .await?;
        Ok(())
    }
}
