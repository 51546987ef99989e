#![allow(clippy::unwrap_used, clippy::expect_used)]

use kbkit_core::errors::{KbError, Result};
use kbkit_core::parsers::{
    Blob, BlobParser, Document, DocumentCache, DocumentCacheParser, DocumentCacheParserFactory,
    Factory,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory cache whose entries can change between lookups
#[derive(Default)]
struct MemoryCache {
    entries: Mutex<HashMap<PathBuf, Document>>,
    lookups: AtomicUsize,
}

impl MemoryCache {
    fn insert(&self, path: &str, document: Document) {
        self.entries
            .lock()
            .unwrap()
            .insert(PathBuf::from(path), document);
    }

    fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl DocumentCache for MemoryCache {
    fn load_document_from_cache(&self, path: &Path) -> Result<Document> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.entries
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| KbError::CacheMiss {
                path: path.display().to_string(),
            })
    }
}

fn setup() -> (Arc<MemoryCache>, DocumentCacheParser) {
    let cache = Arc::new(MemoryCache::default());
    cache.insert("docs/a.json", Document::new("alpha").with_source("a.txt"));
    let parser = DocumentCacheParser::new(cache.clone());
    (cache, parser)
}

#[test]
fn test_lazy_parse_yields_exactly_one_document() {
    let (_cache, parser) = setup();

    let docs: Vec<_> = parser
        .lazy_parse(&Blob::from_path("docs/a.json"))
        .collect();

    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].as_ref().unwrap().page_content, "alpha");
}

#[test]
fn test_unpolled_sequence_does_no_lookup() {
    let (cache, parser) = setup();

    let docs = parser.lazy_parse(&Blob::from_path("docs/a.json"));
    drop(docs);

    assert_eq!(cache.lookups(), 0);
}

#[test]
fn test_lookup_happens_on_poll_not_on_call() {
    let (cache, parser) = setup();
    let blob = Blob::from_path("docs/a.json");

    let mut docs = parser.lazy_parse(&blob);
    cache.insert("docs/a.json", Document::new("replaced").with_source("a.txt"));

    assert_eq!(docs.next().unwrap().unwrap().page_content, "replaced");
    assert!(docs.next().is_none());
    assert_eq!(cache.lookups(), 1);
}

#[test]
fn test_repeated_parses_are_not_memoized() {
    let (cache, parser) = setup();
    let blob = Blob::from_path("docs/a.json");

    let first = parser.parse(&blob).unwrap();
    cache.insert("docs/a.json", Document::new("beta").with_source("a.txt"));
    let second = parser.parse(&blob).unwrap();

    assert_eq!(first[0].page_content, "alpha");
    assert_eq!(second[0].page_content, "beta");
    assert_eq!(cache.lookups(), 2);
}

#[test]
fn test_miss_is_the_single_item() {
    let (_cache, parser) = setup();

    let docs: Vec<_> = parser
        .lazy_parse(&Blob::from_path("docs/missing.json"))
        .collect();

    assert_eq!(docs.len(), 1);
    assert_eq!(
        docs[0],
        Err(KbError::CacheMiss {
            path: "docs/missing.json".to_string()
        })
    );
}

#[test]
fn test_factory_ignores_context() {
    let (cache, _parser) = setup();
    let factory = DocumentCacheParserFactory::new(cache.clone());

    let from_unit: Box<dyn BlobParser> = factory.build(&()).unwrap();
    let from_none: Box<dyn BlobParser> = factory.build(&None::<String>).unwrap();
    let from_str: Box<dyn BlobParser> = factory.build("pipeline-context").unwrap();

    let blob = Blob::from_path("docs/a.json");
    for parser in [from_unit, from_none, from_str] {
        let docs = parser.parse(&blob).unwrap();
        assert_eq!(docs, vec![Document::new("alpha").with_source("a.txt")]);
    }
    assert_eq!(cache.lookups(), 3);
}

#[test]
fn test_factory_builds_independent_parsers() {
    let (cache, _parser) = setup();
    let factory = DocumentCacheParserFactory::new(cache.clone());

    let first: Box<dyn BlobParser> = factory.build(&()).unwrap();
    let second: Box<dyn BlobParser> = factory.build(&()).unwrap();

    let blob = Blob::from_path("docs/a.json");
    let mut pending = first.lazy_parse(&blob);
    assert_eq!(second.parse(&blob).unwrap().len(), 1);
    assert_eq!(cache.lookups(), 1);

    assert!(pending.next().unwrap().is_ok());
    assert_eq!(cache.lookups(), 2);
}
