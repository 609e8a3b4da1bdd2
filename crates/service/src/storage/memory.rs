use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::object_store::{check_name, object_uri, ObjectRef, ObjectStore, StorageError};
use super::sas::{SasPermissions, SasSigner};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: Option<String>,
}

/// Process-local object store for tests and the `memory` backend.
#[derive(Debug)]
pub struct InMemoryObjectStore {
    endpoint: String,
    signer: SasSigner,
    objects: Mutex<HashMap<String, StoredObject>>,
}

impl InMemoryObjectStore {
    pub fn new(endpoint: impl Into<String>, signer: SasSigner) -> Self {
        Self { endpoint: endpoint.into(), signer, objects: Mutex::new(HashMap::new()) }
    }

    // a panicked writer leaves the map itself consistent
    fn objects(&self) -> MutexGuard<'_, HashMap<String, StoredObject>> {
        self.objects.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn get(&self, name: &str) -> Option<StoredObject> {
        self.objects().get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.objects().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn put(&self, name: &str, body: Vec<u8>, content_type: Option<&str>) -> Result<ObjectRef, StorageError> {
        check_name(name)?;
        let stored = StoredObject { body, content_type: content_type.map(str::to_string) };
        self.objects().insert(name.to_string(), stored);
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
