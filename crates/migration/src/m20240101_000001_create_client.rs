//! Create `client` table.
//!
//! Clients own every other record; `code` is the external identifier used
//! to name uploaded files.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Client::Table)
                    .if_not_exists()
                    .col(pk_auto(Client::Id))
                    .col(string_len(Client::Code, 64).unique_key().not_null())
                    .col(string_len(Client::FirstName, 128).not_null())
                    .col(string_len(Client::LastName, 128).not_null())
                    .col(boolean(Client::Deleted).default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Client::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Client { Table, Id, Code, FirstName, LastName, Deleted }
