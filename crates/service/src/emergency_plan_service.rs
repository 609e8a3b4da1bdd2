//! Emergency plans: a record per client code with two document slots
//! (the plan itself and a printable handout) kept in blob storage.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::io::AsyncRead;
use tracing::{info, instrument};

use models::emergency_plan;
use models::errors::ModelError;
use models::record::{require_text, UNSAVED_ID};

use crate::clients::ClientResolver;
use crate::errors::{EntityKind, ServiceError};
use crate::records::service::overwrite;
use crate::records::{NewRecord, RecordKind, RecordPatch, RecordRepository, RecordService};
use crate::storage::naming::{emergency_plan_object, valid_owner_code};
use crate::storage::BlobAccess;

pub struct EmergencyPlanKind;

impl RecordKind for EmergencyPlanKind {
    const ENTITY: EntityKind = EntityKind::EmergencyPlan;
    type Record = emergency_plan::Model;
    type Dto = EmergencyPlanDto;
    type New = NewEmergencyPlan;
    type Patch = EmergencyPlanPatch;
}

pub type EmergencyPlanService<R> = RecordService<EmergencyPlanKind, R>;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewEmergencyPlan {
    pub client_id: Option<i32>,
    pub owner_code: String,
    pub plan_file: Option<String>,
    pub handout_file: Option<String>,
    pub last_uploaded_by: Option<String>,
}

impl NewRecord<emergency_plan::Model> for NewEmergencyPlan {
    fn client_id(&self) -> Option<i32> {
        self.client_id
    }

    fn validate(&self) -> Result<(), ModelError> {
        require_text("owner_code", &self.owner_code)
    }

    fn into_record(self, client_id: i32) -> emergency_plan::Model {
        emergency_plan::Model {
            id: UNSAVED_ID,
            client_id: Some(client_id),
            owner_code: self.owner_code.trim().to_string(),
            plan_file: self.plan_file,
            handout_file: self.handout_file,
            deleted: false,
            last_uploaded_by: self.last_uploaded_by,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EmergencyPlanPatch {
    pub plan_file: Option<String>,
    pub handout_file: Option<String>,
    pub deleted: Option<bool>,
    pub last_uploaded_by: Option<String>,
}

impl RecordPatch<emergency_plan::Model> for EmergencyPlanPatch {
    fn apply_to(self, r: &mut emergency_plan::Model) {
        overwrite(&mut r.plan_file, self.plan_file);
        overwrite(&mut r.handout_file, self.handout_file);
        overwrite(&mut r.last_uploaded_by, self.last_uploaded_by);
        if let Some(d) = self.deleted {
            r.deleted = d;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmergencyPlanDto {
    pub id: i32,
    pub client_id: Option<i32>,
    pub owner_code: String,
    pub plan_file: Option<String>,
    pub handout_file: Option<String>,
    pub last_uploaded_by: Option<String>,
}

impl From<emergency_plan::Model> for EmergencyPlanDto {
    fn from(m: emergency_plan::Model) -> Self {
        Self {
            id: m.id,
            client_id: m.client_id,
            owner_code: m.owner_code,
            plan_file: m.plan_file,
            handout_file: m.handout_file,
            last_uploaded_by: m.last_uploaded_by,
        }
    }
}

/// Which of the two plan documents an upload fills.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanDocument {
    Plan,
    Handout,
}

impl PlanDocument {
    fn slot(self) -> &'static str {
        match self {
            PlanDocument::Plan => "plan",
            PlanDocument::Handout => "handout",
        }
    }
}

/// Signed access URLs for both plan documents; an empty string marks a
/// document that was never uploaded.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmergencyPlanUrls {
    pub owner_code: String,
    pub plan_url: String,
    pub handout_url: String,
}

/// Upload and URL issuance for emergency plan documents.
pub struct EmergencyPlanFiles<R: ?Sized> {
    records: Arc<R>,
    clients: Arc<dyn ClientResolver>,
    blobs: BlobAccess,
}

impl<R> EmergencyPlanFiles<R>
where
    R: RecordRepository<emergency_plan::Model> + ?Sized,
{
    pub fn new(records: Arc<R>, clients: Arc<dyn ClientResolver>, blobs: BlobAccess) -> Self {
        Self { records, clients, blobs }
    }

    /// Upload `size` bytes from `reader` into one document slot of the plan
    /// for `owner_code`, creating the plan record on first upload.
    ///
    /// The owner code must belong to a live client; otherwise nothing is
    /// uploaded. Uploading onto a soft-deleted plan revives it.
    #[instrument(skip(self, reader, content_type), fields(entity = %EmergencyPlanKind::ENTITY))]
    pub async fn store<S>(
        &self,
        reader: S,
        size: u64,
        content_type: Option<&str>,
        owner_code: &str,
        document: PlanDocument,
        uploaded_by: &str,
    ) -> Result<EmergencyPlanDto, ServiceError>
    where
        S: AsyncRead + Unpin + Send,
    {
        let entity = EmergencyPlanKind::ENTITY;
        let owner_code = owner_code.trim();
        if !valid_owner_code(owner_code) {
            return Err(ServiceError::validation(entity, format!("invalid owner code `{owner_code}`")));
        }
        let client = self
            .clients
            .find_by_code(owner_code)
            .await?
            .ok_or_else(|| ServiceError::validation(entity, format!("no client with code {owner_code}")))?;

        let name = emergency_plan_object(owner_code, document.slot(), content_type);
        let object = self.blobs.upload(&name, reader, size, content_type).await?;

        let mut record = match self.records.find_by_owner_code(owner_code).await? {
            Some(existing) => existing,
            None => emergency_plan::Model {
                id: UNSAVED_ID,
                client_id: Some(client.id),
                owner_code: owner_code.to_string(),
                plan_file: None,
                handout_file: None,
                deleted: false,
                last_uploaded_by: None,
            },
        };
        match document {
            PlanDocument::Plan => record.plan_file = Some(object.name),
            PlanDocument::Handout => record.handout_file = Some(object.name),
        }
        record.deleted = false;
        record.last_uploaded_by = Some(uploaded_by.to_string());

        let saved = self.records.save(record).await?;
        info!(id = saved.id, owner_code, document = document.slot(), size, "emergency_plan_stored");
        Ok(saved.into())
    }

    /// Fresh signed URLs for the plan of `owner_code`.
    #[instrument(skip(self), fields(entity = %EmergencyPlanKind::ENTITY))]
    pub async fn plan_urls(&self, owner_code: &str) -> Result<EmergencyPlanUrls, ServiceError> {
        let owner_code = owner_code.trim();
        let record = self
            .records
            .find_by_owner_code(owner_code)
            .await?
            .filter(|r| !r.deleted)
            .ok_or_else(|| ServiceError::not_found(EmergencyPlanKind::ENTITY, owner_code))?;

        Ok(EmergencyPlanUrls {
            plan_url: self.blobs.access_url(record.plan_file.as_deref())?,
            handout_url: self.blobs.access_url(record.handout_file.as_deref())?,
            owner_code: record.owner_code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::clients::mock::InMemoryClientResolver;
    use crate::records::repository::mock::InMemoryRecordRepository;
    use crate::storage::{InMemoryObjectStore, ObjectStore, SasSigner, StorageError};
    use crate::test_support::fixed_clock;

    type Repo = InMemoryRecordRepository<emergency_plan::Model>;

    struct Fixture {
        files: EmergencyPlanFiles<Repo>,
        repo: Arc<Repo>,
        store: Arc<InMemoryObjectStore>,
        clients: Arc<InMemoryClientResolver>,
    }

    fn fixture_with_key(key: &str) -> Fixture {
        let clients = Arc::new(InMemoryClientResolver::default());
        clients.add("100", "Ada", "Lovelace");
        let repo = Arc::new(Repo::default());
        let store = Arc::new(InMemoryObjectStore::new(
            "https://carestore.blob.core.windows.net",
            SasSigner::new("carestore", key, "care-files"),
        ));
        let blobs = BlobAccess::new(store.clone(), fixed_clock());
        Fixture { files: EmergencyPlanFiles::new(repo.clone(), clients.clone(), blobs), repo, store, clients }
    }

    fn fixture() -> Fixture {
        fixture_with_key("Y2FyZS10ZXN0LWtleQ==")
    }

    #[tokio::test]
    async fn stored_plan_gets_signed_url_and_empty_handout() -> Result<(), anyhow::Error> {
        let f = fixture();
        let pdf: &[u8] = b"%PDF-1.7 plan";
        f.files.store(pdf, pdf.len() as u64, Some("application/pdf"), "100", PlanDocument::Plan, "carer1").await?;

        let urls = f.files.plan_urls("100").await?;
        let base = f.store.locate("emergency-plan/100/plan.pdf").uri;
        assert!(urls.plan_url.starts_with(&format!("{base}?")));
        assert!(urls.plan_url.contains("sig="));
        assert_eq!(urls.handout_url, "");
        assert_eq!(urls.owner_code, "100");
        Ok(())
    }

    #[tokio::test]
    async fn second_document_reuses_the_record() -> Result<(), anyhow::Error> {
        let f = fixture();
        let plan = f.files.store(&b"plan"[..], 4, Some("application/pdf"), "100", PlanDocument::Plan, "carer1").await?;
        let handout = f.files.store(&b"handout"[..], 7, None, "100", PlanDocument::Handout, "carer2").await?;

        assert_eq!(plan.id, handout.id);
        assert_eq!(handout.plan_file.as_deref(), Some("emergency-plan/100/plan.pdf"));
        assert_eq!(handout.handout_file.as_deref(), Some("emergency-plan/100/handout"));
        assert_eq!(handout.last_uploaded_by.as_deref(), Some("carer2"));
        assert_eq!(f.repo.rows().len(), 1);
        assert_eq!(f.store.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn reupload_overwrites_the_object() -> Result<(), anyhow::Error> {
        let f = fixture();
        f.files.store(&b"v1"[..], 2, Some("application/pdf"), "100", PlanDocument::Plan, "carer1").await?;
        f.files.store(&b"v2!"[..], 3, Some("application/pdf"), "100", PlanDocument::Plan, "carer1").await?;
        assert_eq!(f.store.get("emergency-plan/100/plan.pdf").unwrap().body, b"v2!");
        assert_eq!(f.store.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn unknown_owner_code_uploads_nothing() {
        let f = fixture();
        let err = f.files.store(&b"x"[..], 1, None, "999", PlanDocument::Plan, "carer1").await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation { entity: EntityKind::EmergencyPlan, .. }));
        assert!(f.store.is_empty());
        assert_eq!(f.repo.save_count(), 0);
    }

    #[tokio::test]
    async fn urls_for_missing_or_deleted_plan_are_not_found() -> Result<(), anyhow::Error> {
        let f = fixture();
        assert!(matches!(f.files.plan_urls("100").await, Err(ServiceError::NotFound { entity: EntityKind::EmergencyPlan, .. })));

        let stored = f.files.store(&b"x"[..], 1, None, "100", PlanDocument::Plan, "carer1").await?;
        let svc = EmergencyPlanService::new(f.repo.clone(), f.clients.clone(), fixed_clock());
        svc.soft_delete(stored.id).await?;
        assert!(matches!(f.files.plan_urls("100").await, Err(ServiceError::NotFound { .. })));

        // a new upload brings it back
        f.files.store(&b"y"[..], 1, None, "100", PlanDocument::Handout, "carer1").await?;
        let urls = f.files.plan_urls("100").await?;
        assert!(!urls.plan_url.is_empty());
        assert!(!urls.handout_url.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn create_refuses_a_code_that_already_has_a_plan() -> Result<(), anyhow::Error> {
        let f = fixture();
        let other = f.clients.add("200", "Grace", "Hopper");
        let ada = f.clients.find_by_code("100").await?.unwrap();
        f.files.store(&b"x"[..], 1, None, "100", PlanDocument::Plan, "carer1").await?;

        let svc = EmergencyPlanService::new(f.repo.clone(), f.clients.clone(), fixed_clock());
        let taken = NewEmergencyPlan { client_id: Some(ada.id), owner_code: "100".into(), ..Default::default() };
        assert!(matches!(svc.create(taken).await, Err(ServiceError::Validation { entity: EntityKind::EmergencyPlan, .. })));
        let foreign = NewEmergencyPlan { client_id: Some(other.id), owner_code: "100".into(), ..Default::default() };
        assert!(matches!(svc.create(foreign).await, Err(ServiceError::Validation { entity: EntityKind::EmergencyPlan, .. })));

        let own = svc.create(NewEmergencyPlan { client_id: Some(other.id), owner_code: "200".into(), ..Default::default() }).await?;
        assert_eq!(own.client_id, Some(other.id));
        assert_eq!(f.repo.rows().len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn short_upload_stores_nothing() {
        let f = fixture();
        let err = f.files.store(&b"abc"[..], 1000, None, "100", PlanDocument::Plan, "carer1").await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(StorageError::SizeMismatch { declared: 1000, read: 3 })));
        assert!(f.store.is_empty());
        assert_eq!(f.repo.save_count(), 0);
    }

    #[tokio::test]
    async fn signing_failure_stays_a_storage_error() -> Result<(), anyhow::Error> {
        let f = fixture_with_key("");
        f.files.store(&b"x"[..], 1, None, "100", PlanDocument::Plan, "carer1").await?;
        let err = f.files.plan_urls("100").await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(StorageError::Credential(_))));
        assert_eq!(err.entity(), None);
        Ok(())
    }

    #[test]
    fn document_and_urls_wire_shape() {
        let doc: PlanDocument = serde_json::from_str("\"handout\"").unwrap();
        assert_eq!(doc, PlanDocument::Handout);

        let urls = EmergencyPlanUrls { owner_code: "100".into(), plan_url: "https://x/p?sig=1".into(), handout_url: String::new() };
        let json = serde_json::to_value(&urls).unwrap();
        assert_eq!(json["handout_url"], "");
        assert_eq!(json["owner_code"], "100");
    }
}
