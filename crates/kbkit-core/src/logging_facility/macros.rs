//! Operation logging macros
//!
//! Cache and CLI operations are bracketed by a `start` record and either an
//! `end` or an `end_error` record. Every record carries `component`, `op`
//! and `event` fields so captures and JSON logs can be filtered per operation.

/// Shared expansion of the `log_op_*` macros
#[doc(hidden)]
#[macro_export]
macro_rules! __log_op {
    ($level:ident, $op:expr, $event:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            component = module_path!(),
            op = $op,
            event = $event,
            $($($field)*)?
        )
    };
}

/// Record that an operation started
///
/// Extra fields follow the `tracing` field syntax.
///
/// # Example
///
/// ```
/// # use kbkit_core::log_op_start;
/// # use std::path::Path;
/// let entry = Path::new(".kbkit/cache/3f/3f9a.json");
/// log_op_start!("store_document", path = %entry.display());
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr $(, $($field:tt)*)?) => {
        $crate::__log_op!(
            info,
            $op,
            $crate::core_types::schema::EVENT_START
            $(, $($field)*)?
        )
    };
}

/// Record that an operation finished after `duration_ms`
///
/// # Example
///
/// ```
/// # use kbkit_core::log_op_end;
/// let started = std::time::Instant::now();
/// log_op_end!(
///     "load_document_from_cache",
///     duration_ms = started.elapsed().as_millis() as u64,
/// );
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {
        $crate::__log_op!(
            info,
            $op,
            $crate::core_types::schema::EVENT_END,
            duration_ms = $duration
            $(, $($field)*)?
        )
    };
}

/// Record that an operation failed
///
/// `$err` is anything convertible into [`ExError`](crate::errors::ExError);
/// the record carries its `err.kind` and stable `err.code`.
///
/// # Example
///
/// ```
/// # use kbkit_core::{log_op_error, errors::KbError};
/// let miss = KbError::CacheMiss { path: "ab/ab12.json".to_string() };
/// log_op_error!("load_document_from_cache", miss, duration_ms = 0_u64, path = "ab/ab12.json");
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, duration_ms = $duration:expr $(, $($field:tt)*)?) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        $crate::__log_op!(
            error,
            $op,
            $crate::core_types::schema::EVENT_END_ERROR,
            duration_ms = $duration,
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code()
            $(, $($field)*)?
        )
    }};
}
