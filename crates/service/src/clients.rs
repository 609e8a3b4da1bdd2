//! Client lookup shared by every record service.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use models::client;

use crate::errors::{db_err, ServiceError};

/// Resolves the client a record belongs to. Soft-deleted clients do not resolve.
#[async_trait]
pub trait ClientResolver: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<client::Model>, ServiceError>;
    async fn find_by_code(&self, code: &str) -> Result<Option<client::Model>, ServiceError>;
}

pub struct SeaOrmClientResolver {
    pub db: DatabaseConnection,
}

#[async_trait]
impl ClientResolver for SeaOrmClientResolver {
    async fn find_by_id(&self, id: i32) -> Result<Option<client::Model>, ServiceError> {
        client::Entity::find()
            .filter(client::Column::Id.eq(id))
            .filter(client::Column::Deleted.eq(false))
            .one(&self.db)
            .await
            .map_err(db_err)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<client::Model>, ServiceError> {
        client::Entity::find()
            .filter(client::Column::Code.eq(code))
            .filter(client::Column::Deleted.eq(false))
            .one(&self.db)
            .await
            .map_err(db_err)
    }
}

/// In-memory client table for tests and benches
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct InMemoryClientResolver {
        clients: Mutex<Vec<client::Model>>,
    }

    impl InMemoryClientResolver {
        pub fn add(&self, code: &str, first_name: &str, last_name: &str) -> client::Model {
            let mut clients = self.clients.lock().unwrap();
            let c = client::Model {
                id: clients.len() as i32 + 1,
                code: code.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
                deleted: false,
            };
            clients.push(c.clone());
            c
        }

        pub fn mark_deleted(&self, id: i32) {
            let mut clients = self.clients.lock().unwrap();
            if let Some(c) = clients.iter_mut().find(|c| c.id == id) {
                c.deleted = true;
            }
        }
    }

    #[async_trait]
    impl ClientResolver for InMemoryClientResolver {
        async fn find_by_id(&self, id: i32) -> Result<Option<client::Model>, ServiceError> {
            let clients = self.clients.lock().unwrap();
            Ok(clients.iter().find(|c| c.id == id && !c.deleted).cloned())
        }

        async fn find_by_code(&self, code: &str) -> Result<Option<client::Model>, ServiceError> {
            let clients = self.clients.lock().unwrap();
            Ok(clients.iter().find(|c| c.code == code && !c.deleted).cloned())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_db, seed_client};
    use sea_orm::{ActiveModelTrait, IntoActiveModel, Set};

    #[tokio::test]
    async fn resolves_live_clients_by_id_and_code() -> Result<(), anyhow::Error> {
        let db = memory_db().await?;
        let c = seed_client(&db, "100").await?;
        let resolver = SeaOrmClientResolver { db: db.clone() };

        assert_eq!(resolver.find_by_id(c.id).await?.map(|m| m.code), Some("100".to_string()));
        assert_eq!(resolver.find_by_code("100").await?.map(|m| m.id), Some(c.id));
        assert!(resolver.find_by_code("999").await?.is_none());

        let mut am = c.clone().into_active_model();
        am.deleted = Set(true);
        am.update(&db).await?;
        assert!(resolver.find_by_id(c.id).await?.is_none());
        assert!(resolver.find_by_code("100").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn mock_hides_deleted_clients() -> Result<(), anyhow::Error> {
        let clients = mock::InMemoryClientResolver::default();
        let c = clients.add("100", "Ada", "Lovelace");
        assert!(clients.find_by_id(c.id).await?.is_some());
        clients.mark_deleted(c.id);
        assert!(clients.find_by_id(c.id).await?.is_none());
        Ok(())
    }
}
