//! Create `emergency_plan` table with FK to `client`.
//!
//! One row per owner code; `plan_file` / `handout_file` hold object names in
//! the blob store and stay NULL until that slot is uploaded.
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
                    .table(EmergencyPlan::Table)
                    .if_not_exists()
                    .col(pk_auto(EmergencyPlan::Id))
                    .col(integer_null(EmergencyPlan::ClientId))
                    .col(string_len(EmergencyPlan::OwnerCode, 64).unique_key().not_null())
                    .col(string_len_null(EmergencyPlan::PlanFile, 255))
                    .col(string_len_null(EmergencyPlan::HandoutFile, 255))
                    .col(boolean(EmergencyPlan::Deleted).default(false))
                    .col(string_len_null(EmergencyPlan::LastUploadedBy, 128))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_emergency_plan_client")
                            .from(EmergencyPlan::Table, EmergencyPlan::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(EmergencyPlan::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum EmergencyPlan {
    Table, Id, ClientId, OwnerCode, PlanFile, HandoutFile, Deleted, LastUploadedBy,
}
