//! Named logger handles
//!
//! A [`Logger`] carries the name console records are attributed to. Callers
//! create one per module with [`logger!`](crate::logger) and inject it into
//! the components that print on their behalf.

use super::Severity;
use kbkit_core_types::schema::{CONSOLE_TARGET, SEVERITY_CRITICAL};
use std::fmt;
use std::sync::Arc;
use tracing::Level;

/// Named logger handle
///
/// Two handles with the same name are interchangeable: every record carries
/// the name in its `logger` field and nothing else is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Logger {
    name: Arc<str>,
}

impl Logger {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Emit one record at `severity`
    ///
    /// Records share the [`CONSOLE_TARGET`] target, so target directives
    /// select facade output as a whole; the logger name is only a field.
    pub fn emit(&self, severity: Severity, message: &dyn fmt::Display) {
        let name = &*self.name;
        match severity {
            Severity::Debug => {
                tracing::debug!(target: CONSOLE_TARGET, logger = name, "{}", message)
            }
            Severity::Info => {
                tracing::info!(target: CONSOLE_TARGET, logger = name, "{}", message)
            }
            Severity::Warning => {
                tracing::warn!(target: CONSOLE_TARGET, logger = name, "{}", message)
            }
            Severity::Error => {
                tracing::error!(target: CONSOLE_TARGET, logger = name, "{}", message)
            }
            Severity::Critical => tracing::error!(
                target: CONSOLE_TARGET,
                logger = name,
                severity = SEVERITY_CRITICAL,
                "{}",
                message
            ),
        }
    }

    /// Whether a record at `severity` would reach any subscriber
    pub fn enabled(&self, severity: Severity) -> bool {
        match severity {
            Severity::Debug => tracing::enabled!(target: CONSOLE_TARGET, Level::DEBUG),
            Severity::Info => tracing::enabled!(target: CONSOLE_TARGET, Level::INFO),
            Severity::Warning => tracing::enabled!(target: CONSOLE_TARGET, Level::WARN),
            Severity::Error | Severity::Critical => {
                tracing::enabled!(target: CONSOLE_TARGET, Level::ERROR)
            }
        }
    }
}

impl fmt::Display for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Create a [`Logger`] named after the invoking module
///
/// # Example
///
/// ```
/// # use kbkit_core::logger;
/// let logger = logger!();
/// assert_eq!(logger.name(), module_path!());
/// ```
#[macro_export]
macro_rules! logger {
    () => {
        $crate::output::Logger::new(module_path!())
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logger_name() {
        let logger = Logger::new("kbkit::ingest");
        assert_eq!(logger.name(), "kbkit::ingest");
        assert_eq!(logger.to_string(), "kbkit::ingest");
    }

    #[test]
    fn test_macro_uses_calling_module() {
        let logger = crate::logger!();
        assert_eq!(logger.name(), "kbkit_core::output::logger::tests");
    }

    #[test]
    fn test_same_module_same_logger() {
        assert_eq!(crate::logger!(), crate::logger!());
    }

    #[test]
    fn test_target_directive_selects_console_records() {
        use crate::logging_facility::test_capture::TestCaptureLayer;
        use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Layer};

        let (layer, capture) = TestCaptureLayer::new();
        let filter = EnvFilter::new(format!("warn,{}=debug", CONSOLE_TARGET));
        let subscriber = tracing_subscriber::registry().with(layer.with_filter(filter));
        let _guard = tracing::subscriber::set_default(subscriber);

        let logger = Logger::new("kbkit::ingest");
        assert!(logger.enabled(Severity::Debug));
        logger.emit(Severity::Debug, &"selected");
        tracing::info!("not selected");

        let events = capture.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].target, CONSOLE_TARGET);
        assert_eq!(events[0].logger.as_deref(), Some("kbkit::ingest"));
        assert_eq!(events[0].message.as_deref(), Some("selected"));
    }
}
