//! SeaORM entities for client-owned care records.
//!
//! Every record table shares the same shape: store-assigned integer id,
//! nullable `client_id`, a `deleted` soft-delete flag and an audit column.
//! [`record`] captures that shape as traits so the service layer can treat
//! the tables generically.

pub mod errors;
pub mod db;
pub mod record;
pub mod client;
pub mod allowance;
pub mod power_of_attorney;
pub mod service_provider;
pub mod emergency_plan;
pub mod house_image;
pub mod role;

pub use record::{OwnedRecord, RecordEntity};

#[cfg(test)]
mod tests {
    use migration::MigratorTrait;
    use sea_orm::{ActiveModelTrait, ConnectOptions, Database, EntityTrait, ModelTrait, Set};

    use crate::{allowance, client, house_image, OwnedRecord};

    #[tokio::test]
    async fn records_resolve_their_client() -> Result<(), anyhow::Error> {
        let mut opts = ConnectOptions::new("sqlite::memory:");
        opts.max_connections(1).min_connections(1).sqlx_logging(false);
        let db = Database::connect(opts).await?;
        migration::Migrator::up(&db, None).await?;

        let c = client::ActiveModel {
            code: Set("100".into()),
            first_name: Set("Ada".into()),
            last_name: Set("Lovelace".into()),
            deleted: Set(false),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let a = allowance::ActiveModel {
            client_id: Set(Some(c.id)),
            allowance_type: Set("pension".into()),
            amount: Set(None),
            frequency: Set(None),
            start_date: Set(None),
            end_date: Set(None),
            notes: Set(None),
            deleted: Set(false),
            last_updated_by: Set(None),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let owner = a.find_related(client::Entity).one(&db).await?.unwrap();
        assert_eq!(owner.code, "100");
        assert_eq!(allowance::Entity::find().all(&db).await?.len(), 1);
        Ok(())
    }

    #[test]
    fn only_house_images_carry_a_timestamp() {
        let at = chrono::DateTime::parse_from_rfc3339("2024-05-01T12:00:00+00:00").unwrap();
        let mut img = house_image::Model {
            id: 0,
            client_id: None,
            owner_code: "100".into(),
            image_file: None,
            description: None,
            deleted: false,
            last_updated_by: None,
            last_updated_at: None,
        };
        assert!(img.is_new());
        img.touch(at);
        assert_eq!(img.last_updated_at, Some(at));
    }
}
