//! Blob parsing contracts
//!
//! A [`BlobParser`] turns one [`Blob`] into a lazy sequence of
//! [`Document`]s. Parsers are built through a [`Factory`] so every pipeline
//! stage is constructed the same way.

mod blob;
mod document_cache;

pub use blob::{Blob, Document};
pub use document_cache::{DocumentCacheParser, DocumentCacheParserFactory};

use crate::errors::Result;
use std::path::Path;

/// Lazy sequence of parsed documents
pub type DocumentIter<'a> = Box<dyn Iterator<Item = Result<Document>> + 'a>;

/// Parser stage of a document-loading pipeline
pub trait BlobParser: Send + Sync {
    /// Documents of `blob`, produced on demand
    fn lazy_parse(&self, blob: &Blob) -> DocumentIter<'_>;

    /// Eagerly collect [`BlobParser::lazy_parse`], stopping at the first error
    fn parse(&self, blob: &Blob) -> Result<Vec<Document>> {
        self.lazy_parse(blob).collect()
    }
}

/// Cache loader collaborator
pub trait DocumentCache: Send + Sync {
    /// Load the cached document stored at `path`
    fn load_document_from_cache(&self, path: &Path) -> Result<Document>;
}

/// Builds a `T` from a shared construction context
pub trait Factory<Ctx: ?Sized, T> {
    fn build(&self, context: &Ctx) -> Result<T>;
}
