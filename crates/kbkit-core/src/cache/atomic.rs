//! Atomic write primitives
//!
//! Uses temp→rename pattern to ensure no partial writes

use crate::errors::{KbError, Result};
use std::fs;
use std::path::Path;

/// Atomically write bytes to a file, creating parent directories
pub fn atomic_write(target_path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|e| KbError::io("create_cache_dir", parent, e))?;
    }

    // Temp file lives in the same directory so the rename stays on one filesystem
    let temp_path = target_path.with_extension("tmp");

    fs::write(&temp_path, content).map_err(|e| KbError::io("write_cache_temp", &temp_path, e))?;

    fs::rename(&temp_path, target_path)
        .map_err(|e| KbError::io("rename_cache_temp", target_path, e))?;

    Ok(())
}
