//! Filesystem document cache
//!
//! Provides:
//! - JSON-encoded documents keyed by the SHA256 of their source
//! - Sharding by first 2 hex chars of the key
//! - Atomic writes

mod atomic;
mod fs_cache;
mod sharding;

pub use fs_cache::FsDocumentCache;
pub use sharding::{cache_key, shard_path, CACHE_EXTENSION};
