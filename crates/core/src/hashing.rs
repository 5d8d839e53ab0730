//! SHA-256 hex digest helper shared by token hashing.

use sha2::{Digest, Sha256};

/// Compute the lowercase hex SHA-256 digest of `data`.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}
