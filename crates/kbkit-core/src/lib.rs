//! kbkit Core - console output and document cache plumbing
//!
//! This crate provides the building blocks shared by the kbkit tools:
//! - A verbosity-aware console output facade over `tracing`
//! - Pluggable table renderers (plain, rich, silent)
//! - Blob and document models with the blob parser contract
//! - A cache-backed document parser and its factory
//! - A filesystem document cache
//! - A single logging initialization point and test capture
//! - TOML/env configuration

pub mod cache;
pub mod config;
pub mod errors;
pub mod logging_facility;
pub mod output;
pub mod parsers;

pub use kbkit_core_types as core_types;

// Re-export commonly used types
pub use cache::FsDocumentCache;
pub use config::KbConfig;
pub use errors::{ExError, ExErrorKind, KbError, Result};
pub use output::{ConsoleOutput, Logger, RendererKind, Severity, TableOptions, TableRenderer};
pub use parsers::{
    Blob, BlobParser, Document, DocumentCache, DocumentCacheParser, DocumentCacheParserFactory,
    Factory,
};
