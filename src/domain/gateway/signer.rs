//! Payeer signature scheme.
//!
//! A signature is the uppercase hex SHA-256 digest of the signed fields followed
//! by the shared secret, all joined with `:`. The field order is fixed by the
//! gateway; reordering breaks interoperability.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Separator between signed elements.
pub const FIELD_DELIMITER: &str = ":";

/// Computes the signature over `fields` terminated by `secret`.
///
/// Absent optional fields must be passed as empty strings. Skipping them
/// changes the joined input and yields a different signature.
pub fn sign<S: AsRef<str>>(secret: &str, fields: &[S]) -> String {
    let mut hasher = Sha256::new();
    for field in fields {
        hasher.update(field.as_ref().as_bytes());
        hasher.update(FIELD_DELIMITER.as_bytes());
    }
    hasher.update(secret.as_bytes());
    hex::encode_upper(hasher.finalize())
}

/// Exact, case-sensitive comparison in constant time.
pub fn signatures_match(expected: &str, provided: &str) -> bool {
    let expected = expected.as_bytes();
    let provided = provided.as_bytes();
    if expected.len() != provided.len() {
        return false;
    }
    expected.ct_eq(provided).into()
}
