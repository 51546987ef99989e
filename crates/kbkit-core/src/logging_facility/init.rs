//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use super::format::ConsoleFormatter;
use crate::config::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// Human-readable console lines on stderr
    #[default]
    Development,
    /// JSON structured output for production
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Initialize the logging facility
///
/// This function should be called once at application startup by the entry
/// point; later calls are no-ops. The minimum severity is read from
/// `RUST_LOG` when set, otherwise from `config.level`.
///
/// `RUST_LOG` target directives match tracing targets, not logger names.
/// Every [`ConsoleOutput`](crate::output::ConsoleOutput) record uses the
/// `kbkit::console` target, so `kbkit::console=debug` enables verbose facade
/// output as a whole; a single `logger!()` name cannot be selected this way.
/// Operation records keep their module path as target.
///
/// # Profiles
///
/// - **Development**: `<timestamp> - <logger> <SEVERITY> <message>` lines
/// - **Production**: JSON structured logs
/// - **Test**: bare registry, see [`super::test_capture`]
///
/// # Example
///
/// ```
/// use kbkit_core::config::LoggingConfig;
/// use kbkit_core::logging_facility::{init, Profile};
/// use kbkit_core::Severity;
///
/// init(&LoggingConfig::new(Profile::Development, Severity::Debug));
/// ```
pub fn init(config: &LoggingConfig) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.directive()));

        // A subscriber installed by someone else (e.g. a test harness) wins
        let _ = match config.profile {
            Profile::Development => tracing_subscriber::fmt()
                .event_format(ConsoleFormatter)
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(filter)
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
    });
}
