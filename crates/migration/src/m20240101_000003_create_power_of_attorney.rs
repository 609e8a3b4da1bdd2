//! Create `power_of_attorney` table with FK to `client`.
use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240101_000001_create_client::Client;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PowerOfAttorney::Table)
                    .if_not_exists()
                    .col(pk_auto(PowerOfAttorney::Id))
                    .col(integer_null(PowerOfAttorney::ClientId))
                    .col(string_len(PowerOfAttorney::AttorneyName, 128).not_null())
                    .col(string_len_null(PowerOfAttorney::AttorneyType, 64))
                    .col(string_len_null(PowerOfAttorney::Phone, 32))
                    .col(string_len_null(PowerOfAttorney::Email, 255))
                    .col(string_len_null(PowerOfAttorney::Address, 255))
                    .col(date_null(PowerOfAttorney::StartDate))
                    .col(boolean(PowerOfAttorney::Deleted).default(false))
                    .col(string_len_null(PowerOfAttorney::LastUpdatedBy, 128))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_power_of_attorney_client")
                            .from(PowerOfAttorney::Table, PowerOfAttorney::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(PowerOfAttorney::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum PowerOfAttorney {
    Table, Id, ClientId, AttorneyName, AttorneyType, Phone, Email, Address, StartDate, Deleted, LastUpdatedBy,
}
