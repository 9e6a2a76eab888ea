//! Canonical JSON form and checksum for backup documents
//!
//! Serialization and verification must agree on one byte representation
//! of the payload or no backup would ever verify. The canonical form is
//! compact JSON with object keys in sorted order; `serde_json` maps are
//! BTreeMap-backed, so converting through `Value` sorts keys regardless
//! of struct field order.

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::{ExpenseError, ExpenseResult};

/// Prefix carried by every stored checksum
pub const CHECKSUM_PREFIX: &str = "sha256:";

/// Render a value in canonical form: compact JSON, sorted object keys
pub fn canonicalize<T: Serialize>(value: &T) -> ExpenseResult<String> {
    let value = serde_json::to_value(value)
        .map_err(|e| ExpenseError::Json(format!("Failed to canonicalize value: {}", e)))?;

    serde_json::to_string(&value)
        .map_err(|e| ExpenseError::Json(format!("Failed to render canonical JSON: {}", e)))
}

/// Compute the checksum of a canonical payload
///
/// Returns `"sha256:"` followed by 64 lowercase hex characters.
pub fn checksum_payload(canonical: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{}{}", CHECKSUM_PREFIX, hex::encode(hasher.finalize()))
}

/// Verify a stored checksum against a canonical payload
///
/// The stored value is compared digest-to-digest after stripping the
/// `"sha256:"` prefix; a stored value without the prefix never matches.
pub fn verify_checksum(canonical: &str, stored: &str) -> bool {
    match stored.strip_prefix(CHECKSUM_PREFIX) {
        Some(digest) => {
            let mut hasher = Sha256::new();
            hasher.update(canonical.as_bytes());
            hex::encode(hasher.finalize()) == digest
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_form_sorts_keys() {
        let canonical = canonicalize(&json!({"zebra": 1, "apple": 2, "mango": 3})).unwrap();
        assert_eq!(canonical, r#"{"apple":2,"mango":3,"zebra":1}"#);
    }

    #[test]
    fn test_canonical_form_is_compact() {
        let canonical = canonicalize(&json!({"a": [1, 2], "b": "x"})).unwrap();
        assert!(!canonical.contains(' '));
        assert!(!canonical.contains('\n'));
    }

    #[test]
    fn test_same_logical_data_same_checksum() {
        let a = canonicalize(&json!({"x": 1, "y": 2})).unwrap();
        let b = canonicalize(&json!({"y": 2, "x": 1})).unwrap();
        assert_eq!(checksum_payload(&a), checksum_payload(&b));
    }

    #[test]
    fn test_checksum_format() {
        let checksum = checksum_payload("{}");
        assert!(checksum.starts_with("sha256:"));
        let digest = checksum.strip_prefix("sha256:").unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_verify_round_trip() {
        let payload = canonicalize(&json!({"n": 42})).unwrap();
        let checksum = checksum_payload(&payload);
        assert!(verify_checksum(&payload, &checksum));
    }

    #[test]
    fn test_verify_rejects_mutation() {
        let payload = canonicalize(&json!({"n": 42})).unwrap();
        let checksum = checksum_payload(&payload);
        let tampered = payload.replace("42", "43");
        assert!(!verify_checksum(&tampered, &checksum));
    }

    #[test]
    fn test_verify_rejects_missing_prefix() {
        let payload = "{}";
        let bare_digest = checksum_payload(payload)
            .strip_prefix("sha256:")
            .unwrap()
            .to_string();
        assert!(!verify_checksum(payload, &bare_digest));
    }
}
