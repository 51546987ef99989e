//! Canonical schema constants for structured logging and console output
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_MESSAGE: &str = "message";

// Console output fields
pub const FIELD_LOGGER: &str = "logger";
pub const FIELD_SEVERITY: &str = "severity";

// Cache identifiers
pub const FIELD_PATH: &str = "path";
pub const FIELD_SOURCE: &str = "source";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

/// Tracing target of every console facade record
///
/// `RUST_LOG=kbkit::console=debug` selects facade output; the individual
/// logger is carried in [`FIELD_LOGGER`].
pub const CONSOLE_TARGET: &str = "kbkit::console";

// Status bracket markers
pub const STATUS_START: &str = "[START]";
pub const STATUS_END: &str = "[END]";

/// Severity label carried by critical console records.
///
/// The tracing backend has no level above `ERROR`, so critical records are
/// emitted at `ERROR` and tagged with this value in [`FIELD_SEVERITY`].
pub const SEVERITY_CRITICAL: &str = "CRITICAL";
