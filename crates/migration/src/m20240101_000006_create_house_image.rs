//! Create `house_image` table with FK to `client`.
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
                    .table(HouseImage::Table)
                    .if_not_exists()
                    .col(pk_auto(HouseImage::Id))
                    .col(integer_null(HouseImage::ClientId))
                    .col(string_len(HouseImage::OwnerCode, 64).unique_key().not_null())
                    .col(string_len_null(HouseImage::ImageFile, 255))
                    .col(text_null(HouseImage::Description))
                    .col(boolean(HouseImage::Deleted).default(false))
                    .col(string_len_null(HouseImage::LastUpdatedBy, 128))
                    .col(timestamp_with_time_zone_null(HouseImage::LastUpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_house_image_client")
                            .from(HouseImage::Table, HouseImage::ClientId)
                            .to(Client::Table, Client::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(HouseImage::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum HouseImage {
    Table, Id, ClientId, OwnerCode, ImageFile, Description, Deleted, LastUpdatedBy, LastUpdatedAt,
}
