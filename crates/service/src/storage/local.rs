use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::debug;

use super::object_store::{check_name, object_uri, ObjectRef, ObjectStore, StorageError};
use super::sas::{SasPermissions, SasSigner};

/// Filesystem-backed store: objects live under `root/<container>/<name>`
/// and are addressed through `endpoint`, which is expected to serve that
/// directory (a blob emulator or a static file server).
#[derive(Clone, Debug)]
pub struct LocalObjectStore {
    root: PathBuf,
    endpoint: String,
    signer: SasSigner,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, endpoint: impl Into<String>, signer: SasSigner) -> Self {
        Self { root: root.into(), endpoint: endpoint.into(), signer }
    }

    fn path_for(&self, name: &str) -> PathBuf {
        Path::new(&self.root).join(self.signer.container()).join(name)
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    async fn put(&self, name: &str, body: Vec<u8>, content_type: Option<&str>) -> Result<ObjectRef, StorageError> {
        check_name(name)?;
        let path = self.path_for(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let size = body.len();
        fs::write(&path, body).await?;
        debug!(object = name, size, content_type = content_type.unwrap_or(""), path = %path.display(), "object_stored");
        Ok(self.locate(name))
    }

    fn locate(&self, name: &str) -> ObjectRef {
        ObjectRef { name: name.to_string(), uri: object_uri(&self.endpoint, self.signer.container(), name) }
    }

    fn signed_url(&self, object: &ObjectRef, permissions: SasPermissions, expires_at: DateTime<Utc>) -> Result<String, StorageError> {
        let query = self.signer.sign(&object.name, permissions, expires_at)?;
        Ok(format!("{}?{}", object.uri, query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_writes_and_overwrites_file() -> Result<(), anyhow::Error> {
        let root = std::env::temp_dir().join(format!("local_object_store_{}", uuid::Uuid::new_v4()));
        let store = LocalObjectStore::new(&root, "http://127.0.0.1:10000/dev", SasSigner::new("dev", "a2V5", "files"));

        let obj = store.put("house-image/100.jpg", b"first".to_vec(), Some("image/jpeg")).await?;
        assert_eq!(obj.uri, "http://127.0.0.1:10000/dev/files/house-image/100.jpg");
        store.put("house-image/100.jpg", b"second".to_vec(), None).await?;

        let on_disk = tokio::fs::read(root.join("files/house-image/100.jpg")).await?;
        assert_eq!(on_disk, b"second");

        let _ = tokio::fs::remove_dir_all(&root).await;
        Ok(())
    }

    #[tokio::test]
    async fn put_rejects_escaping_names() {
        let root = std::env::temp_dir().join(format!("local_object_store_{}", uuid::Uuid::new_v4()));
        let store = LocalObjectStore::new(&root, "http://localhost", SasSigner::new("dev", "a2V5", "files"));
        let err = store.put("../outside", vec![1], None).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidName(_)));
    }
}
