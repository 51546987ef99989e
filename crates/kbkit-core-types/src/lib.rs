//! Core types shared across kbkit facilities
//!
//! This crate provides the canonical vocabulary used by both the logging
//! facility and the console output facade:
//!
//! - **Field keys**: names of structured fields attached to log records
//! - **Event names**: operation boundary markers
//! - **Status markers**: prefixes of bracketed console status lines

pub mod schema;
