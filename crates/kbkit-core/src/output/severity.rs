//! Severity tiers for console output

use crate::errors::KbError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;
use tracing::Level;

/// Named severity level of a console record
///
/// Ordered from least to most severe, so `a >= b` reads "a is at least as
/// severe as b".
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum Severity {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    /// Above `Error`; emitted at the backend's `ERROR` level with a
    /// `severity = "CRITICAL"` tag.
    Critical,
}

impl Severity {
    /// Upper-case label used in console lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }

    /// Backend level records of this severity are emitted at
    pub fn as_level(&self) -> Level {
        match self {
            Severity::Debug => Level::DEBUG,
            Severity::Info => Level::INFO,
            Severity::Warning => Level::WARN,
            Severity::Error | Severity::Critical => Level::ERROR,
        }
    }

    /// Level filter admitting this severity and everything above it
    pub fn level_filter(&self) -> LevelFilter {
        LevelFilter::from_level(self.as_level())
    }

    /// `EnvFilter` directive for a global minimum of this severity
    pub fn directive(&self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warning => "warn",
            Severity::Error | Severity::Critical => "error",
        }
    }

    /// Lower-case config name; unlike [`Severity::directive`] it keeps
    /// `critical` distinct from `error`
    fn config_name(&self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
            other => other.directive(),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = KbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" | "verbose" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            "critical" | "fatal" => Ok(Severity::Critical),
            _ => Err(KbError::InvalidLevel {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Severity {
    type Error = KbError;

    fn try_from(value: String) -> Result<Self, KbError> {
        value.parse()
    }
}

impl From<Severity> for String {
    fn from(severity: Severity) -> Self {
        severity.config_name().to_string()
    }
}
