//! Configuration for kbkit tools
//!
//! Configuration is read from a TOML file where every section and key is
//! optional:
//!
//! ```toml
//! [logging]
//! profile = "development"   # development | production | test
//! level = "info"            # debug | info | warning | error | critical
//!
//! [output]
//! verbose = false
//! renderer = "plain"        # plain | rich | silent
//!
//! [cache]
//! root = ".kbkit/cache"
//! ```
//!
//! Environment variables override the file: `KBKIT_LOG_LEVEL`,
//! `KBKIT_VERBOSE` and `KBKIT_CACHE_ROOT`.

use crate::errors::{KbError, Result};
use crate::logging_facility::Profile;
use crate::output::{RendererKind, Severity};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_LOG_LEVEL: &str = "KBKIT_LOG_LEVEL";
pub const ENV_VERBOSE: &str = "KBKIT_VERBOSE";
pub const ENV_CACHE_ROOT: &str = "KBKIT_CACHE_ROOT";

pub const DEFAULT_CACHE_ROOT: &str = ".kbkit/cache";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KbConfig {
    pub logging: LoggingConfig,
    pub output: OutputConfig,
    pub cache: CacheConfig,
}

/// Global logging setup, consumed once by [`crate::logging_facility::init`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    pub profile: Profile,
    /// Global minimum severity
    pub level: Severity,
}

impl LoggingConfig {
    pub fn new(profile: Profile, level: Severity) -> Self {
        Self { profile, level }
    }
}

/// Console output facade settings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub verbose: bool,
    pub renderer: RendererKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    pub root: PathBuf,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_CACHE_ROOT),
        }
    }
}

impl KbConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| KbError::InvalidConfig {
            reason: e.to_string(),
        })
    }

    /// Read and parse a TOML configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text =
            std::fs::read_to_string(path).map_err(|e| KbError::io("read_config", path, e))?;
        Self::from_toml_str(&text)
    }

    /// Apply `KBKIT_*` overrides from the process environment
    pub fn apply_env(self) -> Result<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.logging.level = level.parse()?;
        }
        if let Some(verbose) = lookup(ENV_VERBOSE) {
            self.output.verbose = parse_flag(&verbose)?;
        }
        if let Some(root) = lookup(ENV_CACHE_ROOT) {
            self.cache.root = PathBuf::from(root);
        }
        Ok(self)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(KbError::InvalidConfig {
            reason: format!("{} must be a boolean, got {:?}", ENV_VERBOSE, other),
        }),
    }
}
