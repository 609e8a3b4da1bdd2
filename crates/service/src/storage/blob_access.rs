use std::sync::Arc;

use chrono::Duration;
use common::Clock;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, instrument};

use super::object_store::{ObjectRef, ObjectStore, StorageError};
use super::sas::SasPermissions;

pub const DEFAULT_URL_TTL_MINUTES: i64 = 10;
/// Longest lifetime the blob service accepts for a signed URL (7 days).
pub const MAX_URL_TTL_MINUTES: i64 = 7 * 24 * 60;

/// Cap on the up-front buffer reservation; larger uploads grow as they read.
const MAX_PREALLOC: u64 = 8 * 1024 * 1024;

/// Uploads files and hands out short-lived signed URLs for them.
///
/// Stateless apart from its collaborators: nothing about issued URLs is
/// remembered, so they cannot be revoked and may be used any number of
/// times before they expire.
#[derive(Clone)]
pub struct BlobAccess {
    store: Arc<dyn ObjectStore>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl BlobAccess {
    pub fn new(store: Arc<dyn ObjectStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock, ttl: Duration::minutes(DEFAULT_URL_TTL_MINUTES) }
    }

    /// URL lifetime in minutes, clamped to `1..=MAX_URL_TTL_MINUTES`.
    pub fn with_ttl_minutes(mut self, minutes: i64) -> Self {
        self.ttl = Duration::minutes(minutes.clamp(1, MAX_URL_TTL_MINUTES));
        self
    }

    /// Read exactly `size` bytes from `reader` and store them under `name`,
    /// replacing any earlier object of that name. Bytes past `size` are not
    /// read; a stream that ends early is refused and nothing is stored.
    #[instrument(skip(self, reader), fields(object = name))]
    pub async fn upload<S>(&self, name: &str, reader: S, size: u64, content_type: Option<&str>) -> Result<ObjectRef, StorageError>
    where
        S: AsyncRead + Unpin + Send,
    {
        let mut body = Vec::with_capacity(size.min(MAX_PREALLOC) as usize);
        reader.take(size).read_to_end(&mut body).await?;
        debug!(declared = size, read = body.len(), "upload_buffered");
        if body.len() as u64 != size {
            return Err(StorageError::SizeMismatch { declared: size, read: body.len() as u64 });
        }
        self.store.put(name, body, content_type).await
    }

    /// Signed read/write/list URL for `name`, valid for the configured TTL
    /// from now. An unset slot yields an empty string.
    pub fn access_url(&self, name: Option<&str>) -> Result<String, StorageError> {
        let Some(name) = name.filter(|n| !n.is_empty()) else {
            return Ok(String::new());
        };
        let object = self.store.locate(name);
        let now = self.clock.now();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| StorageError::Expiry(format!("{now} + {} minutes", self.ttl.num_minutes())))?;
        self.store.signed_url(&object, SasPermissions::READ_WRITE_LIST, expires_at)
    }
}
