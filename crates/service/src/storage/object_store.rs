use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use super::sas::SasPermissions;

/// Infrastructure failures from the blob store. Never folded into the
/// entity-specific error kinds.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid storage credentials: {0}")]
    Credential(String),
    #[error("invalid object name: {0}")]
    InvalidName(String),
    #[error("upload declared {declared} bytes but the stream held {read}")]
    SizeMismatch { declared: u64, read: u64 },
    #[error("url expiry out of range: {0}")]
    Expiry(String),
    #[error("object store io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A stored object: its name within the container and its base URI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectRef {
    pub name: String,
    pub uri: String,
}

/// Opaque object store with a put / signed-URL contract.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `body` under `name`, replacing any previous object of that name.
    async fn put(&self, name: &str, body: Vec<u8>, content_type: Option<&str>) -> Result<ObjectRef, StorageError>;

    /// Reference for an object by name; does not check that it exists.
    fn locate(&self, name: &str) -> ObjectRef;

    /// Time-limited URL granting `permissions` on `object` until `expires_at`.
    fn signed_url(
        &self,
        object: &ObjectRef,
        permissions: SasPermissions,
        expires_at: DateTime<Utc>,
    ) -> Result<String, StorageError>;
}

pub(crate) fn object_uri(endpoint: &str, container: &str, name: &str) -> String {
    format!("{}/{}/{}", endpoint.trim_end_matches('/'), container, name)
}

/// Object names are generated, but still never allowed to escape the container.
pub(crate) fn check_name(name: &str) -> Result<(), StorageError> {
    if name.is_empty() || name.starts_with('/') || name.split('/').any(|seg| seg.is_empty() || seg == "..") {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_uri_joins_without_double_slash() {
        assert_eq!(object_uri("https://a.example/", "c", "x/y.pdf"), "https://a.example/c/x/y.pdf");
    }

    #[test]
    fn check_name_rejects_traversal() {
        assert!(check_name("emergency-plan/100/plan.pdf").is_ok());
        assert!(check_name("../etc/passwd").is_err());
        assert!(check_name("/abs").is_err());
        assert!(check_name("a//b").is_err());
        assert!(check_name("").is_err());
    }
}
