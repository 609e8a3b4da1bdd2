//! Create `allowance` table with FK to `client`.
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
                    .table(Allowance::Table)
                    .if_not_exists()
                    .col(pk_auto(Allowance::Id))
                    .col(integer_null(Allowance::ClientId))
                    .col(string_len(Allowance::AllowanceType, 128).not_null())
                    .col(string_len_null(Allowance::Amount, 64))
                    .col(string_len_null(Allowance::Frequency, 64))
                    .col(date_null(Allowance::StartDate))
                    .col(date_null(Allowance::EndDate))
                    .col(text_null(Allowance::Notes))
                    .col(boolean(Allowance::Deleted).default(false))
                    .col(string_len_null(Allowance::LastUpdatedBy, 128))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_allowance_client")
                            .from(Allowance::Table, Allowance::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Allowance::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Allowance {
    Table, Id, ClientId, AllowanceType, Amount, Frequency, StartDate, EndDate, Notes, Deleted, LastUpdatedBy,
}
