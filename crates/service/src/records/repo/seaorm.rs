use std::marker::PhantomData;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder,
};

use models::{OwnedRecord, RecordEntity};

use crate::errors::{db_err, ServiceError};
use crate::records::repository::RecordRepository;

/// One repository type for every record table; the entity's
/// [`RecordEntity`] impl supplies the columns.
pub struct SeaOrmRecordRepository<E> {
    pub db: DatabaseConnection,
    _entity: PhantomData<fn() -> E>,
}

impl<E> SeaOrmRecordRepository<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db, _entity: PhantomData }
    }
}

#[async_trait::async_trait]
impl<E> RecordRepository<E::Model> for SeaOrmRecordRepository<E>
where
    E: RecordEntity,
    E::Model: OwnedRecord + IntoActiveModel<E::ActiveModel>,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: i32) -> Result<Option<E::Model>, ServiceError> {
        E::find()
            .filter(E::id_column().eq(id))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_by_client_id_and_deleted(&self, client_id: i32, deleted: bool) -> Result<Vec<E::Model>, ServiceError> {
        E::find()
            .filter(E::client_column().eq(client_id))
            .filter(E::deleted_column().eq(deleted))
            .order_by_asc(E::id_column())
            .all(&self.db)
            .await
            .map_err(db_err)
    }

    async fn save(&self, record: E::Model) -> Result<E::Model, ServiceError> {
        let is_new = record.is_new();
        // every column is written; the record was merged in memory already
        let mut am = record.into_active_model().reset_all();
        if is_new {
            am.not_set(E::id_column());
            am.insert(&self.db).await.map_err(db_err)
        } else {
            am.update(&self.db).await.map_err(db_err)
        }
    }

    async fn find_by_owner_code(&self, code: &str) -> Result<Option<E::Model>, ServiceError> {
        let Some(column) = E::owner_code_column() else {
            return Ok(None);
        };
        E::find().filter(column.eq(code)).one(&self.db).await.map_err(db_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_db, seed_client};
    use models::{allowance, house_image};

    fn allowance(client_id: i32, kind: &str) -> allowance::Model {
        allowance::Model {
            id: models::record::UNSAVED_ID,
            client_id: Some(client_id),
            allowance_type: kind.into(),
            amount: Some("120.50".into()),
            frequency: None,
            start_date: None,
            end_date: None,
            notes: None,
            deleted: false,
            last_updated_by: Some("carer1".into()),
        }
    }

    #[tokio::test]
    async fn insert_then_update_keeps_identity() -> Result<(), anyhow::Error> {
        let db = memory_db().await?;
        let client = seed_client(&db, "100").await?;
        let repo = SeaOrmRecordRepository::<allowance::Entity>::new(db);

        let saved = repo.save(allowance(client.id, "pension")).await?;
        assert!(saved.id > 0);

        let mut changed = saved.clone();
        changed.frequency = Some("weekly".into());
        let updated = repo.save(changed).await?;
        assert_eq!(updated.id, saved.id);

        let found = repo.find_by_id(saved.id).await?.unwrap();
        assert_eq!(found.frequency.as_deref(), Some("weekly"));
        assert_eq!(found.amount.as_deref(), Some("120.50"));
        Ok(())
    }

    #[tokio::test]
    async fn list_filters_deleted_and_orders_by_id() -> Result<(), anyhow::Error> {
        let db = memory_db().await?;
        let client = seed_client(&db, "100").await?;
        let other = seed_client(&db, "200").await?;
        let repo = SeaOrmRecordRepository::<allowance::Entity>::new(db);

        let a = repo.save(allowance(client.id, "pension")).await?;
        let mut b = repo.save(allowance(client.id, "care grant")).await?;
        let c = repo.save(allowance(client.id, "mobility")).await?;
        repo.save(allowance(other.id, "pension")).await?;
        b.deleted = true;
        repo.save(b).await?;

        let live = repo.find_by_client_id_and_deleted(client.id, false).await?;
        assert_eq!(live.iter().map(|r| r.id).collect::<Vec<_>>(), vec![a.id, c.id]);
        let gone = repo.find_by_client_id_and_deleted(client.id, true).await?;
        assert_eq!(gone.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn owner_code_lookup() -> Result<(), anyhow::Error> {
        let db = memory_db().await?;
        let client = seed_client(&db, "100").await?;
        let repo = SeaOrmRecordRepository::<house_image::Entity>::new(db);

        assert!(repo.find_by_owner_code("100").await?.is_none());
        repo.save(house_image::Model {
            id: models::record::UNSAVED_ID,
            client_id: Some(client.id),
            owner_code: "100".into(),
            image_file: Some("house-image/100.jpg".into()),
            description: None,
            deleted: false,
            last_updated_by: None,
            last_updated_at: None,
        })
        .await?;
        let found = repo.find_by_owner_code("100").await?.unwrap();
        assert_eq!(found.image_file.as_deref(), Some("house-image/100.jpg"));
        Ok(())
    }
}
