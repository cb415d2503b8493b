//! Cache key generation using SHA-256 hashes

use sha2::{Digest, Sha256};

/// Generate a deterministic cache key for an endpoint as seen by a principal.
///
/// Different principals never share a key, so one account can not read
/// another account's folder listing from the cache.
pub fn cache_key(endpoint: &str, principal: &str) -> String {
    let mut hasher = Sha256::new();

    hasher.update(endpoint.as_bytes());
    hasher.update(b"|");
    hasher.update(principal.as_bytes());

    format!("{:x}", hasher.finalize())
}
