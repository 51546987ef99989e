use thiserror::Error;

/// Result type alias using KbError
pub type Result<T> = std::result::Result<T, KbError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and log assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input/Configuration
    InvalidInput,
    InvalidConfig,

    // Cache
    NotFound,
    CorruptEntry,

    // Integration/IO
    Io,
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::CorruptEntry => "ERR_CORRUPT_ENTRY",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the context
/// (operation, path, message) needed to log or report the failure.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for kbkit operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KbError {
    // ===== Cache Errors =====
    /// No cached document exists at the requested path
    #[error("No cached document at {path}")]
    CacheMiss { path: String },

    /// A cache entry exists but cannot be decoded as a document
    #[error("Corrupt cache entry {path}: {reason}")]
    CacheCorrupt { path: String, reason: String },

    /// Document has no `source` metadata to key the cache on
    #[error("Document has no source metadata and cannot be cached")]
    MissingSource,

    // ===== Configuration Errors =====
    /// Configuration could not be read or validated
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Unknown severity name
    #[error("Unknown severity level: {value}")]
    InvalidLevel { value: String },

    /// Unknown table renderer name
    #[error("Unknown table renderer: {value}")]
    InvalidRenderer { value: String },

    // ===== Generic Errors =====
    /// Filesystem failure
    #[error("I/O error during {op} on {path}: {message}")]
    Io {
        op: String,
        path: String,
        message: String,
    },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl KbError {
    /// Build an [`KbError::Io`] from a `std::io::Error`
    pub fn io(op: &str, path: impl AsRef<std::path::Path>, err: std::io::Error) -> Self {
        KbError::Io {
            op: op.to_string(),
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from KbError to ExError
impl From<KbError> for ExError {
    fn from(err: KbError) -> Self {
        match err {
            KbError::CacheMiss { path } => ExError::new(ExErrorKind::NotFound)
                .with_op("load_document_from_cache")
                .with_path(path)
                .with_message("No cached document"),

            KbError::CacheCorrupt { path, reason } => ExError::new(ExErrorKind::CorruptEntry)
                .with_op("load_document_from_cache")
                .with_path(path)
                .with_message(reason),

            KbError::MissingSource => ExError::new(ExErrorKind::InvalidInput)
                .with_op("store_document")
                .with_message("Document has no source metadata"),

            KbError::InvalidConfig { reason } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(reason)
            }

            KbError::InvalidLevel { value } => ExError::new(ExErrorKind::InvalidConfig)
                .with_message(format!("Unknown severity level: {}", value)),

            KbError::InvalidRenderer { value } => ExError::new(ExErrorKind::InvalidConfig)
                .with_message(format!("Unknown table renderer: {}", value)),

            KbError::Io { op, path, message } => ExError::new(ExErrorKind::Io)
                .with_op(op)
                .with_path(path)
                .with_message(message),

            KbError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for KbError {
    fn from(err: serde_json::Error) -> Self {
        KbError::Serialization {
            message: err.to_string(),
        }
    }
}
