//! Create `role` table with FK to `client`.
//!
//! Roles name the part a person plays in a client's care (next of kin, GP, ...).
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
                    .table(Role::Table)
                    .if_not_exists()
                    .col(pk_auto(Role::Id))
                    .col(integer_null(Role::ClientId))
                    .col(string_len(Role::RoleName, 128).not_null())
                    .col(text_null(Role::Description))
                    .col(boolean(Role::Deleted).default(false))
                    .col(string_len_null(Role::LastUpdatedBy, 128))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_role_client")
                            .from(Role::Table, Role::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Role::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Role { Table, Id, ClientId, RoleName, Description, Deleted, LastUpdatedBy }
