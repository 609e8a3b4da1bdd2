use serde::{Deserialize, Serialize};

use models::errors::ModelError;
use models::record::{require_text, UNSAVED_ID};
use models::service_provider;

use crate::errors::EntityKind;
use crate::records::service::overwrite;
use crate::records::{NewRecord, RecordKind, RecordPatch, RecordService};

pub struct ServiceProviderKind;

impl RecordKind for ServiceProviderKind {
    const ENTITY: EntityKind = EntityKind::ServiceProvider;
    type Record = service_provider::Model;
    type Dto = ServiceProviderDto;
    type New = NewServiceProvider;
    type Patch = ServiceProviderPatch;
}

pub type ServiceProviderService<R> = RecordService<ServiceProviderKind, R>;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewServiceProvider {
    pub client_id: Option<i32>,
    pub name: String,
    pub service_type: Option<String>,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub last_updated_by: Option<String>,
}

impl NewRecord<service_provider::Model> for NewServiceProvider {
    fn client_id(&self) -> Option<i32> {
        self.client_id
    }

    fn validate(&self) -> Result<(), ModelError> {
        require_text("name", &self.name)
    }

    fn into_record(self, client_id: i32) -> service_provider::Model {
        service_provider::Model {
            id: UNSAVED_ID,
            client_id: Some(client_id),
            name: self.name,
            service_type: self.service_type,
            contact_name: self.contact_name,
            phone: self.phone,
            email: self.email,
            address: self.address,
            notes: self.notes,
            deleted: false,
            last_updated_by: self.last_updated_by,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ServiceProviderPatch {
    pub name: Option<String>,
    pub service_type: Option<String>,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub deleted: Option<bool>,
    pub last_updated_by: Option<String>,
}

impl RecordPatch<service_provider::Model> for ServiceProviderPatch {
    fn validate(&self) -> Result<(), ModelError> {
        match &self.name {
            Some(n) => require_text("name", n),
            None => Ok(()),
        }
    }

    fn apply_to(self, r: &mut service_provider::Model) {
        if let Some(n) = self.name {
            r.name = n;
        }
        overwrite(&mut r.service_type, self.service_type);
        overwrite(&mut r.contact_name, self.contact_name);
        overwrite(&mut r.phone, self.phone);
        overwrite(&mut r.email, self.email);
        overwrite(&mut r.address, self.address);
        overwrite(&mut r.notes, self.notes);
        overwrite(&mut r.last_updated_by, self.last_updated_by);
        if let Some(d) = self.deleted {
            r.deleted = d;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ServiceProviderDto {
    pub id: i32,
    pub client_id: Option<i32>,
    pub name: String,
    pub service_type: Option<String>,
    pub contact_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub notes: Option<String>,
    pub last_updated_by: Option<String>,
}

impl From<service_provider::Model> for ServiceProviderDto {
    fn from(m: service_provider::Model) -> Self {
        Self {
            id: m.id,
            client_id: m.client_id,
            name: m.name,
            service_type: m.service_type,
            contact_name: m.contact_name,
            phone: m.phone,
            email: m.email,
            address: m.address,
            notes: m.notes,
            last_updated_by: m.last_updated_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::clients::mock::InMemoryClientResolver;
    use crate::errors::ServiceError;
    use crate::records::repo::SeaOrmRecordRepository;
    use crate::records::repository::mock::InMemoryRecordRepository;
    use crate::test_support::{fixed_clock, memory_db, seed_client};

    #[tokio::test]
    async fn deleted_client_does_not_resolve_on_create() {
        let clients = Arc::new(InMemoryClientResolver::default());
        let client = clients.add("100", "Ada", "Lovelace");
        clients.mark_deleted(client.id);
        let repo = Arc::new(InMemoryRecordRepository::<service_provider::Model>::default());
        let svc = ServiceProviderService::new(repo.clone(), clients, fixed_clock());

        let err = svc
            .create(NewServiceProvider { client_id: Some(client.id), name: "District nurses".into(), ..Default::default() })
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation { entity: EntityKind::ServiceProvider, .. }));
        assert_eq!(repo.save_count(), 0);
    }

    #[tokio::test]
    async fn round_trip_through_sqlite() -> Result<(), anyhow::Error> {
        let db = memory_db().await?;
        let client = seed_client(&db, "100").await?;
        let svc = ServiceProviderService::new(
            Arc::new(SeaOrmRecordRepository::<service_provider::Entity>::new(db.clone())),
            Arc::new(crate::clients::SeaOrmClientResolver { db }),
            fixed_clock(),
        );

        let created = svc
            .create(NewServiceProvider {
                client_id: Some(client.id),
                name: "Meals on Wheels".into(),
                service_type: Some("catering".into()),
                phone: Some("0800 111".into()),
                notes: Some("Delivers at noon".into()),
                ..Default::default()
            })
            .await?;
        assert_eq!(svc.list_by_client(client.id).await?, vec![created.clone()]);

        let updated = svc
            .update(created.id, ServiceProviderPatch { contact_name: Some("Jo".into()), ..Default::default() })
            .await?;
        assert_eq!(updated.contact_name.as_deref(), Some("Jo"));
        assert_eq!(updated.notes.as_deref(), Some("Delivers at noon"));

        svc.soft_delete(created.id).await?;
        assert!(svc.list_by_client(client.id).await?.is_empty());
        assert!(matches!(svc.list_by_client(client.id + 100).await, Err(ServiceError::ClientNotFound(_))));
        Ok(())
    }
}
