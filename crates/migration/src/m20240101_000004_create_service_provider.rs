//! Create `service_provider` table with FK to `client`.
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
                    .table(ServiceProvider::Table)
                    .if_not_exists()
                    .col(pk_auto(ServiceProvider::Id))
                    .col(integer_null(ServiceProvider::ClientId))
                    .col(string_len(ServiceProvider::Name, 128).not_null())
                    .col(string_len_null(ServiceProvider::ServiceType, 64))
                    .col(string_len_null(ServiceProvider::ContactName, 128))
                    .col(string_len_null(ServiceProvider::Phone, 32))
                    .col(string_len_null(ServiceProvider::Email, 255))
                    .col(string_len_null(ServiceProvider::Address, 255))
                    .col(text_null(ServiceProvider::Notes))
                    .col(boolean(ServiceProvider::Deleted).default(false))
                    .col(string_len_null(ServiceProvider::LastUpdatedBy, 128))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_service_provider_client")
                            .from(ServiceProvider::Table, ServiceProvider::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceProvider::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum ServiceProvider {
    Table, Id, ClientId, Name, ServiceType, ContactName, Phone, Email, Address, Notes, Deleted, LastUpdatedBy,
}
