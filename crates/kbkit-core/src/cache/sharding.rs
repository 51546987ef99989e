//! Cache key derivation and sharding
//!
//! Documents are keyed by the SHA256 of their source and stored under a
//! subdirectory named after the first 2 hex characters of the key, keeping
//! directory sizes bounded.

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Extension of cached document files
pub const CACHE_EXTENSION: &str = "json";

/// Hex SHA256 of a document source
pub fn cache_key(source: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(source.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compute the shard path for a given key
///
/// For key "abc123...", returns "<root>/ab/abc123.json". Keys shorter than
/// two bytes, or split mid-character at byte two, are their own shard.
pub fn shard_path(root: &Path, key: &str) -> PathBuf {
    let shard = key.get(..2).unwrap_or(key);

    root.join(shard).join(format!("{}.{}", key, CACHE_EXTENSION))
}
