//! Structured logging facility for kbkit
//!
//! This module provides:
//! - Single initialization point via `init(&LoggingConfig)`
//! - Console line format `<timestamp> - <logger> <SEVERITY> <message>`
//! - Operation logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! # Usage
//!
//! ```rust
//! use kbkit_core::config::LoggingConfig;
//! use kbkit_core::logging_facility::init;
//!
//! // Initialize once at application startup
//! init(&LoggingConfig::default());
//! ```

pub mod format;
pub mod init;
pub mod macros;
pub mod test_capture;

pub use format::{format_line, ConsoleFormatter};
pub use init::{init, Profile};
pub use test_capture::{init_test_capture, scoped_capture, CapturedEvent, TestCapture};
