//! Parser that reads documents back out of a document cache

use super::{Blob, BlobParser, DocumentCache, DocumentIter, Factory};
use crate::errors::Result;
use std::sync::Arc;

/// Yields the single cached document stored at a blob's path
///
/// Nothing is loaded until the returned sequence is polled, and each
/// `lazy_parse` call performs a fresh lookup. Cache errors are passed
/// through unchanged as the only item.
#[derive(Clone)]
pub struct DocumentCacheParser {
    cache: Arc<dyn DocumentCache>,
}

impl DocumentCacheParser {
    pub fn new(cache: Arc<dyn DocumentCache>) -> Self {
        Self { cache }
    }
}

impl std::fmt::Debug for DocumentCacheParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCacheParser").finish_non_exhaustive()
    }
}

impl BlobParser for DocumentCacheParser {
    fn lazy_parse(&self, blob: &Blob) -> DocumentIter<'_> {
        let path = blob.path.clone();
        Box::new(std::iter::once_with(move || {
            self.cache.load_document_from_cache(&path)
        }))
    }
}

/// Factory for [`DocumentCacheParser`]
///
/// The construction context is accepted for uniformity with other factories
/// and otherwise ignored.
#[derive(Clone)]
pub struct DocumentCacheParserFactory {
    cache: Arc<dyn DocumentCache>,
}

impl DocumentCacheParserFactory {
    pub fn new(cache: Arc<dyn DocumentCache>) -> Self {
        Self { cache }
    }
}

impl<Ctx: ?Sized> Factory<Ctx, Box<dyn BlobParser>> for DocumentCacheParserFactory {
    fn build(&self, _context: &Ctx) -> Result<Box<dyn BlobParser>> {
        Ok(Box::new(DocumentCacheParser::new(self.cache.clone())))
    }
}
