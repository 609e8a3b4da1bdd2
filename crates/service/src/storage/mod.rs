//! Blob storage: the object-store seam, SAS signing, and the access component
//! shared by the file-bearing record kinds.

pub mod blob_access;
pub mod local;
pub mod memory;
pub mod naming;
pub mod object_store;
pub mod sas;

use std::sync::Arc;

use common::Clock;
use configs::StorageConfig;

pub use blob_access::{BlobAccess, DEFAULT_URL_TTL_MINUTES, MAX_URL_TTL_MINUTES};
pub use local::LocalObjectStore;
pub use memory::InMemoryObjectStore;
pub use object_store::{ObjectRef, ObjectStore, StorageError};
pub use sas::{SasPermissions, SasSigner};

/// Development endpoint used when neither `endpoint` nor `account_name` is configured.
const DEV_ENDPOINT: &str = "http://127.0.0.1:10000/devstoreaccount1";

/// Build the configured object store.
pub fn build_object_store(cfg: &StorageConfig) -> Arc<dyn ObjectStore> {
    let signer = SasSigner::new(&cfg.account_name, &cfg.account_key, &cfg.container);
    let endpoint = if cfg.endpoint.trim().is_empty() { DEV_ENDPOINT.to_string() } else { cfg.endpoint.clone() };
    match cfg.backend.as_str() {
        "memory" => Arc::new(InMemoryObjectStore::new(endpoint, signer)),
        _ => Arc::new(LocalObjectStore::new(&cfg.local_root, endpoint, signer)),
    }
}

/// Object store plus URL issuance with the configured expiry.
pub fn build_blob_access(cfg: &StorageConfig, clock: Arc<dyn Clock>) -> BlobAccess {
    BlobAccess::new(build_object_store(cfg), clock).with_ttl_minutes(cfg.sas_expiry_minutes)
}
