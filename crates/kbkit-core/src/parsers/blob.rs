//! Blob and document models

use kbkit_core_types::schema::FIELD_SOURCE;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Reference to a file-like resource handed to a parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    pub path: PathBuf,
    pub mimetype: Option<String>,
}

impl Blob {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mimetype: None,
        }
    }

    pub fn with_mimetype(mut self, mimetype: impl Into<String>) -> Self {
        self.mimetype = Some(mimetype.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A unit of text plus arbitrary metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub page_content: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Document {
    pub fn new(page_content: impl Into<String>) -> Self {
        Self {
            page_content: page_content.into(),
            metadata: BTreeMap::new(),
        }
    }

    /// Attach the `source` metadata entry
    pub fn with_source(self, source: impl Into<String>) -> Self {
        self.with_metadata(FIELD_SOURCE, source.into())
    }

    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// The `source` metadata entry, when it is a string
    pub fn source(&self) -> Option<&str> {
        self.metadata.get(FIELD_SOURCE).and_then(|v| v.as_str())
    }
}
