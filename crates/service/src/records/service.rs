use std::marker::PhantomData;
use std::sync::Arc;

use common::Clock;
use models::errors::ModelError;
use models::OwnedRecord;
use tracing::{debug, info, instrument};

use crate::clients::ClientResolver;
use crate::errors::{EntityKind, ServiceError};
use super::repository::RecordRepository;

/// Binds a record table to its request and response shapes.
pub trait RecordKind: Send + Sync + 'static {
    const ENTITY: EntityKind;
    type Record: OwnedRecord;
    type Dto: From<Self::Record>;
    type New: NewRecord<Self::Record>;
    type Patch: RecordPatch<Self::Record>;
}

/// Create request for a record.
pub trait NewRecord<M> {
    fn client_id(&self) -> Option<i32>;
    /// Required-field checks; runs before the client is resolved.
    fn validate(&self) -> Result<(), ModelError>;
    /// Build an unsaved record owned by the resolved client.
    fn into_record(self, client_id: i32) -> M;
}

/// Partial update: `Some` fields overwrite, `None` fields are left alone.
pub trait RecordPatch<M> {
    fn validate(&self) -> Result<(), ModelError> {
        Ok(())
    }
    fn apply_to(self, record: &mut M);
}

/// Patch helper for nullable columns: a present value replaces, absence keeps.
pub fn overwrite<T>(slot: &mut Option<T>, value: Option<T>) {
    if let Some(v) = value {
        *slot = Some(v);
    }
}

/// Create/read/update logic shared by every record kind.
pub struct RecordService<K: RecordKind, R: ?Sized> {
    records: Arc<R>,
    clients: Arc<dyn ClientResolver>,
    clock: Arc<dyn Clock>,
    _kind: PhantomData<fn() -> K>,
}

impl<K, R> RecordService<K, R>
where
    K: RecordKind,
    R: RecordRepository<K::Record> + ?Sized,
{
    pub fn new(records: Arc<R>, clients: Arc<dyn ClientResolver>, clock: Arc<dyn Clock>) -> Self {
        Self { records, clients, clock, _kind: PhantomData }
    }

    /// Validate and persist a new record for an existing client.
    ///
    /// Checks run in a fixed order: client id present, required fields
    /// non-blank, client resolves. Records keyed by owner code must carry
    /// the client's own code, and a code already holding a row (deleted or
    /// not) is refused. Any failure is a validation error for this record
    /// kind and nothing is written.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use common::SystemClock;
    /// use service::clients::mock::InMemoryClientResolver;
    /// use service::records::repository::mock::InMemoryRecordRepository;
    /// use service::role_service::{NewRole, RoleService};
    ///
    /// let clients = Arc::new(InMemoryClientResolver::default());
    /// let client = clients.add("100", "Ada", "Lovelace");
    /// let records = Arc::new(InMemoryRecordRepository::<models::role::Model>::default());
    /// let svc = RoleService::new(records, clients, Arc::new(SystemClock));
    /// let role = tokio_test::block_on(svc.create(NewRole {
    ///     client_id: Some(client.id),
    ///     role_name: "next of kin".into(),
    ///     ..Default::default()
    /// })).unwrap();
    /// assert_eq!(role.role_name, "next of kin");
    /// ```
    #[instrument(skip(self, request), fields(entity = %K::ENTITY))]
    pub async fn create(&self, request: K::New) -> Result<K::Dto, ServiceError> {
        let client_id = request
            .client_id()
            .ok_or_else(|| ServiceError::validation(K::ENTITY, "client id required"))?;
        request.validate().map_err(|e| ServiceError::from_model(K::ENTITY, e))?;
        let client = self
            .clients
            .find_by_id(client_id)
            .await?
            .ok_or_else(|| ServiceError::validation(K::ENTITY, format!("client {client_id} not found")))?;

        let mut record = request.into_record(client.id);
        if let Some(code) = record.owner_code() {
            if code != client.code {
                return Err(ServiceError::validation(
                    K::ENTITY,
                    format!("owner code {code} does not belong to client {client_id}"),
                ));
            }
            if self.records.find_by_owner_code(code).await?.is_some() {
                return Err(ServiceError::validation(K::ENTITY, format!("owner code {code} already has a record")));
            }
        }
        record.set_deleted(false);
        record.touch(self.clock.now().into());
        let saved = self.records.save(record).await?;
        info!(id = saved.id(), client_id = client.id, "record_created");
        Ok(saved.into())
    }

    /// Live record by id; soft-deleted records read as not found.
    #[instrument(skip(self), fields(entity = %K::ENTITY))]
    pub async fn get(&self, id: i32) -> Result<K::Dto, ServiceError> {
        match self.records.find_by_id(id).await? {
            Some(r) if !r.is_deleted() => Ok(r.into()),
            _ => Err(ServiceError::not_found(K::ENTITY, id)),
        }
    }

    /// Non-deleted records of a client in store order.
    #[instrument(skip(self), fields(entity = %K::ENTITY))]
    pub async fn list_by_client(&self, client_id: i32) -> Result<Vec<K::Dto>, ServiceError> {
        if self.clients.find_by_id(client_id).await?.is_none() {
            return Err(ServiceError::ClientNotFound(client_id));
        }
        let rows = self.records.find_by_client_id_and_deleted(client_id, false).await?;
        debug!(count = rows.len(), "records_listed");
        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Merge `patch` onto the stored record and write it back once.
    ///
    /// Reaches soft-deleted records too, so a patch with `deleted: Some(false)`
    /// restores one. The client association is never changed. An unknown
    /// id is reported as not found before the patch itself is checked.
    #[instrument(skip(self, patch), fields(entity = %K::ENTITY))]
    pub async fn update(&self, id: i32, patch: K::Patch) -> Result<K::Dto, ServiceError> {
        let mut record = self
            .records
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(K::ENTITY, id))?;
        patch.validate().map_err(|e| ServiceError::from_model(K::ENTITY, e))?;

        patch.apply_to(&mut record);
        record.touch(self.clock.now().into());
        let saved = self.records.save(record).await?;
        info!(id, deleted = saved.is_deleted(), "record_updated");
        Ok(saved.into())
    }

    /// Flag a record deleted. It stays readable through [`update`](Self::update).
    #[instrument(skip(self), fields(entity = %K::ENTITY))]
    pub async fn soft_delete(&self, id: i32) -> Result<(), ServiceError> {
        let mut record = self
            .records
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(K::ENTITY, id))?;
        record.set_deleted(true);
        record.touch(self.clock.now().into());
        self.records.save(record).await?;
        info!(id, "record_soft_deleted");
        Ok(())
    }
}
