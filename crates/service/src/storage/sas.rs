//! Shared-access-signature generation for blob URLs.
//!
//! Signs the blob-service string-to-sign of SAS version [`SAS_VERSION`] with
//! the account's shared key (HMAC-SHA256) and renders the query string that
//! is appended to the object's URI.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, SecondsFormat, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::form_urlencoded;

use super::object_store::StorageError;

type HmacSha256 = Hmac<Sha256>;

pub const SAS_VERSION: &str = "2019-12-12";
const SIGNED_RESOURCE_BLOB: &str = "b";
const SIGNED_PROTOCOL: &str = "https";

/// Permission set carried by a signature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SasPermissions {
    pub read: bool,
    pub write: bool,
    pub list: bool,
}

impl SasPermissions {
    pub const READ_WRITE_LIST: SasPermissions = SasPermissions { read: true, write: true, list: true };
    pub const READ: SasPermissions = SasPermissions { read: true, write: false, list: false };

    /// Canonical `sp` value; the service requires the order r, w, l.
    pub fn as_param(self) -> String {
        let mut sp = String::with_capacity(3);
        if self.read { sp.push('r'); }
        if self.write { sp.push('w'); }
        if self.list { sp.push('l'); }
        sp
    }
}

#[derive(Clone)]
pub struct SasSigner {
    account: String,
    key: String,
    container: String,
}

impl std::fmt::Debug for SasSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SasSigner")
            .field("account", &self.account)
            .field("container", &self.container)
            .finish_non_exhaustive()
    }
}

impl SasSigner {
    /// `key` is the base64 account key; it is decoded when signing so a bad
    /// key surfaces as a credential error on the request that needs it.
    pub fn new(account: &str, key: &str, container: &str) -> Self {
        Self { account: account.trim().to_string(), key: key.trim().to_string(), container: container.trim().to_string() }
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    /// Query string (without the leading `?`) granting `permissions` on
    /// `blob_name` until `expires_at`.
    pub fn sign(&self, blob_name: &str, permissions: SasPermissions, expires_at: DateTime<Utc>) -> Result<String, StorageError> {
        if self.account.is_empty() {
            return Err(StorageError::Credential("account name is not configured".into()));
        }
        let key = self.decoded_key()?;
        let expiry = expires_at.to_rfc3339_opts(SecondsFormat::Secs, true);
        let sp = permissions.as_param();
        if sp.is_empty() {
            return Err(StorageError::Credential("signature must grant at least one permission".into()));
        }

        let resource = format!("/blob/{}/{}/{}", self.account, self.container, blob_name);
        let string_to_sign = [
            sp.as_str(),
            "", // signed start
            expiry.as_str(),
            resource.as_str(),
            "", // signed identifier
            "", // signed ip
            SIGNED_PROTOCOL,
            SAS_VERSION,
            SIGNED_RESOURCE_BLOB,
            "", // snapshot time
            "", // rscc
            "", // rscd
            "", // rsce
            "", // rscl
            "", // rsct
        ]
        .join("\n");

        let mut mac = HmacSha256::new_from_slice(&key)
            .map_err(|e| StorageError::Credential(e.to_string()))?;
        mac.update(string_to_sign.as_bytes());
        let sig = STANDARD.encode(mac.finalize().into_bytes());

        Ok(form_urlencoded::Serializer::new(String::new())
            .append_pair("sv", SAS_VERSION)
            .append_pair("se", &expiry)
            .append_pair("sr", SIGNED_RESOURCE_BLOB)
            .append_pair("sp", &sp)
            .append_pair("spr", SIGNED_PROTOCOL)
            .append_pair("sig", &sig)
            .finish())
    }

    fn decoded_key(&self) -> Result<Vec<u8>, StorageError> {
        if self.key.is_empty() {
            return Err(StorageError::Credential("account key is not configured".into()));
        }
        STANDARD
            .decode(&self.key)
            .map_err(|e| StorageError::Credential(format!("account key is not valid base64: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn signer() -> SasSigner {
        // "care-test-key" in base64
        SasSigner::new("carestore", "Y2FyZS10ZXN0LWtleQ==", "care-files")
    }

    fn expiry() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 10, 0).unwrap()
    }

    fn param(query: &str, name: &str) -> Option<String> {
        form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn permissions_render_in_canonical_order() {
        assert_eq!(SasPermissions::READ_WRITE_LIST.as_param(), "rwl");
        assert_eq!(SasPermissions { list: true, read: true, write: false }.as_param(), "rl");
        assert_eq!(SasPermissions::default().as_param(), "");
    }

    #[test]
    fn query_carries_expiry_permissions_and_signature() {
        let q = signer().sign("emergency-plan/100/plan.pdf", SasPermissions::READ_WRITE_LIST, expiry()).unwrap();
        assert_eq!(param(&q, "sv").as_deref(), Some(SAS_VERSION));
        assert_eq!(param(&q, "se").as_deref(), Some("2024-05-01T12:10:00Z"));
        assert_eq!(param(&q, "sp").as_deref(), Some("rwl"));
        assert_eq!(param(&q, "sr").as_deref(), Some("b"));
        let sig = param(&q, "sig").unwrap();
        assert_eq!(STANDARD.decode(sig).unwrap().len(), 32);
        // ':' in the expiry is percent-encoded in the raw query
        assert!(q.contains("se=2024-05-01T12%3A10%3A00Z"));
    }

    #[test]
    fn signature_is_deterministic_and_bound_to_the_blob() {
        let s = signer();
        let a = s.sign("house-image/100.jpg", SasPermissions::READ, expiry()).unwrap();
        let b = s.sign("house-image/100.jpg", SasPermissions::READ, expiry()).unwrap();
        let c = s.sign("house-image/101.jpg", SasPermissions::READ, expiry()).unwrap();
        assert_eq!(a, b);
        assert_ne!(param(&a, "sig"), param(&c, "sig"));
    }

    #[test]
    fn bad_or_missing_key_is_a_credential_error() {
        let bad = SasSigner::new("carestore", "not base64!!", "care-files");
        assert!(matches!(bad.sign("x", SasPermissions::READ, expiry()), Err(StorageError::Credential(_))));

        let missing = SasSigner::new("carestore", "", "care-files");
        assert!(matches!(missing.sign("x", SasPermissions::READ, expiry()), Err(StorageError::Credential(_))));
    }

    #[test]
    fn missing_account_is_a_credential_error() {
        let anonymous = SasSigner::new("  ", "Y2FyZS10ZXN0LWtleQ==", "care-files");
        assert!(matches!(anonymous.sign("x", SasPermissions::READ, expiry()), Err(StorageError::Credential(_))));
    }

    #[test]
    fn empty_permission_set_is_rejected() {
        assert!(signer().sign("x", SasPermissions::default(), expiry()).is_err());
    }
}
