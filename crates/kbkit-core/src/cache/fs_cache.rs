//! Filesystem-backed document cache
//!
//! Documents are stored as pretty-printed JSON under
//! `<root>/<shard>/<sha256(source)>.json` and read back by path.

use crate::cache::atomic::atomic_write;
use crate::cache::sharding::{cache_key, shard_path, CACHE_EXTENSION};
use crate::errors::{KbError, Result};
use crate::parsers::{Blob, Document, DocumentCache};
use crate::{log_op_end, log_op_error, log_op_start};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

const JSON_MIMETYPE: &str = "application/json";

/// Filesystem document cache
#[derive(Debug, Clone)]
pub struct FsDocumentCache {
    root: PathBuf,
}

impl FsDocumentCache {
    /// Create a cache rooted at the given directory
    ///
    /// The directory is created lazily on first store.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a document with this source is cached at
    pub fn cache_path(&self, source: &str) -> PathBuf {
        shard_path(&self.root, &cache_key(source))
    }

    pub fn contains(&self, source: &str) -> bool {
        self.cache_path(source).is_file()
    }

    /// Cache a document under its `source` metadata
    ///
    /// Storing a document for an already cached source replaces the entry.
    pub fn store(&self, document: &Document) -> Result<PathBuf> {
        let source = document.source().ok_or(KbError::MissingSource)?;
        let target = self.cache_path(source);

        logged("store_document", &target, || {
            let bytes = serde_json::to_vec_pretty(document)?;
            atomic_write(&target, &bytes)?;
            Ok(target.clone())
        })
    }

    /// Every cached entry as a blob, sorted by path
    ///
    /// A cache root that does not exist yet holds no entries.
    pub fn blobs(&self) -> Result<Vec<Blob>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for shard in read_dir(&self.root)? {
            if !shard.is_dir() {
                continue;
            }
            for entry in read_dir(&shard)? {
                let is_entry = entry.is_file()
                    && entry.extension().and_then(|e| e.to_str()) == Some(CACHE_EXTENSION);
                if is_entry {
                    paths.push(entry);
                }
            }
        }
        paths.sort();

        Ok(paths
            .into_iter()
            .map(|p| Blob::from_path(p).with_mimetype(JSON_MIMETYPE))
            .collect())
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl DocumentCache for FsDocumentCache {
    /// Read the document cached at `path`
    ///
    /// Relative paths are resolved against the cache root.
    ///
    /// # Errors
    /// * `CacheMiss` - nothing is cached at `path`
    /// * `CacheCorrupt` - the entry is not a JSON document
    /// * `Io` - any other read failure
    fn load_document_from_cache(&self, path: &Path) -> Result<Document> {
        let resolved = self.resolve(path);

        logged("load_document_from_cache", &resolved, || {
            let bytes = fs::read(&resolved).map_err(|e| match e.kind() {
                ErrorKind::NotFound => KbError::CacheMiss {
                    path: resolved.display().to_string(),
                },
                _ => KbError::io("read_cache", &resolved, e),
            })?;

            serde_json::from_slice(&bytes).map_err(|e| KbError::CacheCorrupt {
                path: resolved.display().to_string(),
                reason: e.to_string(),
            })
        })
    }
}

fn read_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir).map_err(|e| KbError::io("list_cache", dir, e))?;
    let mut paths = Vec::new();
    for entry in entries {
        paths.push(entry.map_err(|e| KbError::io("list_cache", dir, e))?.path());
    }
    Ok(paths)
}

/// Run a cache operation between start and end/error records
fn logged<T>(op: &'static str, path: &Path, f: impl FnOnce() -> Result<T>) -> Result<T> {
    let started = Instant::now();
    log_op_start!(op, path = %path.display());

    let result = f();
    let duration_ms = started.elapsed().as_millis() as u64;

    match &result {
        Ok(_) => {
            log_op_end!(op, duration_ms = duration_ms, path = %path.display());
        }
        Err(err) => {
            log_op_error!(op, err.clone(), duration_ms = duration_ms, path = %path.display());
        }
    }

    result
}
