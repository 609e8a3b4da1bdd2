use std::sync::Arc;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncRead;
use tracing::{info, instrument};

use common::Clock;
use models::errors::ModelError;
use models::house_image;
use models::record::{require_text, UNSAVED_ID};
use models::OwnedRecord;

use crate::clients::ClientResolver;
use crate::errors::{EntityKind, ServiceError};
use crate::records::service::overwrite;
use crate::records::{NewRecord, RecordKind, RecordPatch, RecordRepository, RecordService};
use crate::storage::naming::{house_image_object, valid_owner_code};
use crate::storage::BlobAccess;

pub struct HouseImageKind;

impl RecordKind for HouseImageKind {
    const ENTITY: EntityKind = EntityKind::HouseImage;
    type Record = house_image::Model;
    type Dto = HouseImageDto;
    type New = NewHouseImage;
    type Patch = HouseImagePatch;
}

pub type HouseImageService<R> = RecordService<HouseImageKind, R>;

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewHouseImage {
    pub client_id: Option<i32>,
    pub owner_code: String,
    pub image_file: Option<String>,
    pub description: Option<String>,
    pub last_updated_by: Option<String>,
}

impl NewRecord<house_image::Model> for NewHouseImage {
    fn client_id(&self) -> Option<i32> {
        self.client_id
    }

    fn validate(&self) -> Result<(), ModelError> {
        require_text("owner_code", &self.owner_code)
    }

    fn into_record(self, client_id: i32) -> house_image::Model {
        house_image::Model {
            id: UNSAVED_ID,
            client_id: Some(client_id),
            owner_code: self.owner_code.trim().to_string(),
            image_file: self.image_file,
            description: self.description,
            deleted: false,
            last_updated_by: self.last_updated_by,
            last_updated_at: None,
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct HouseImagePatch {
    pub image_file: Option<String>,
    pub description: Option<String>,
    pub deleted: Option<bool>,
    pub last_updated_by: Option<String>,
}

impl RecordPatch<house_image::Model> for HouseImagePatch {
    fn apply_to(self, r: &mut house_image::Model) {
        overwrite(&mut r.image_file, self.image_file);
        overwrite(&mut r.description, self.description);
        overwrite(&mut r.last_updated_by, self.last_updated_by);
        if let Some(d) = self.deleted {
            r.deleted = d;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HouseImageDto {
    pub id: i32,
    pub client_id: Option<i32>,
    pub owner_code: String,
    pub image_file: Option<String>,
    pub description: Option<String>,
    pub last_updated_by: Option<String>,
    pub last_updated_at: Option<DateTime<FixedOffset>>,
}

impl From<house_image::Model> for HouseImageDto {
    fn from(m: house_image::Model) -> Self {
        Self {
            id: m.id,
            client_id: m.client_id,
            owner_code: m.owner_code,
            image_file: m.image_file,
            description: m.description,
            last_updated_by: m.last_updated_by,
            last_updated_at: m.last_updated_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HouseImageUrl {
    pub owner_code: String,
    /// Empty when no image has been uploaded yet.
    pub image_url: String,
}

/// Upload and URL issuance for house images.
pub struct HouseImageFiles<R: ?Sized> {
    records: Arc<R>,
    clients: Arc<dyn ClientResolver>,
    blobs: BlobAccess,
    clock: Arc<dyn Clock>,
}

impl<R> HouseImageFiles<R>
where
    R: RecordRepository<house_image::Model> + ?Sized,
{
    pub fn new(records: Arc<R>, clients: Arc<dyn ClientResolver>, blobs: BlobAccess, clock: Arc<dyn Clock>) -> Self {
        Self { records, clients, blobs, clock }
    }

    /// Replace the house image for `owner_code`, creating its record on
    /// first upload. `description` is only written when given.
    #[instrument(skip(self, reader, content_type, description), fields(entity = %HouseImageKind::ENTITY))]
    pub async fn store_image<S>(
        &self,
        reader: S,
        size: u64,
        content_type: Option<&str>,
        owner_code: &str,
        description: Option<String>,
        uploaded_by: &str,
    ) -> Result<HouseImageDto, ServiceError>
    where
        S: AsyncRead + Unpin + Send,
    {
        let entity = HouseImageKind::ENTITY;
        let owner_code = owner_code.trim();
        if !valid_owner_code(owner_code) {
            return Err(ServiceError::validation(entity, format!("invalid owner code `{owner_code}`")));
        }
        let client = self
            .clients
            .find_by_code(owner_code)
            .await?
            .ok_or_else(|| ServiceError::validation(entity, format!("no client with code {owner_code}")))?;

        let object = self
            .blobs
            .upload(&house_image_object(owner_code, content_type), reader, size, content_type)
            .await?;

        let mut record = match self.records.find_by_owner_code(owner_code).await? {
            Some(existing) => existing,
            None => house_image::Model {
                id: UNSAVED_ID,
                client_id: Some(client.id),
                owner_code: owner_code.to_string(),
                image_file: None,
                description: None,
                deleted: false,
                last_updated_by: None,
                last_updated_at: None,
            },
        };
        record.image_file = Some(object.name);
        overwrite(&mut record.description, description);
        record.deleted = false;
        record.last_updated_by = Some(uploaded_by.to_string());
        record.touch(self.clock.now().into());

        let saved = self.records.save(record).await?;
        info!(id = saved.id, owner_code, size, "house_image_stored");
        Ok(saved.into())
    }

    /// Fresh signed URL for the house image of `owner_code`.
    #[instrument(skip(self), fields(entity = %HouseImageKind::ENTITY))]
    pub async fn image_url(&self, owner_code: &str) -> Result<HouseImageUrl, ServiceError> {
        let owner_code = owner_code.trim();
        let record = self
            .records
            .find_by_owner_code(owner_code)
            .await?
            .filter(|r| !r.deleted)
            .ok_or_else(|| ServiceError::not_found(HouseImageKind::ENTITY, owner_code))?;

        Ok(HouseImageUrl { image_url: self.blobs.access_url(record.image_file.as_deref())?, owner_code: record.owner_code })
    }
}
