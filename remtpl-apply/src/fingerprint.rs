//! Content fingerprints for change detection.
//!
//! SHA-256 is used for stability, not for any integrity guarantee.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `content`.
pub fn fingerprint(content: impl AsRef<[u8]>) -> String {
    let mut h = Sha256::new();
    h.update(content.as_ref());
    hex::encode(h.finalize())
}
