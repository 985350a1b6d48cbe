//! Utility functions for error handling
//!
//! File helpers that attach the path and purpose of the operation to IO failures.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, SynthError};

/// Safely read a file to string with rich error information
///
/// # Arguments
/// * `path` - The path to the file to read
/// * `purpose` - Why the file is being read (for error context)
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    if !path.is_file() {
        return Err(SynthError::io(
            format!("{} (needed for: {purpose})", path.display()),
            io::Error::new(io::ErrorKind::NotFound, "file not found"),
        ));
    }

    fs::read_to_string(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                format!("{}: permission denied - check file permissions", path.display())
            }
            io::ErrorKind::InvalidData => {
                format!("{}: file contains invalid UTF-8 data", path.display())
            }
            _ => format!("{}: failed to read file for: {purpose}", path.display()),
        };
        SynthError::io(context, e)
    })
}

/// Create (or truncate) a file for writing, creating missing parent directories
///
/// # Arguments
/// * `path` - The path of the file to create
/// * `purpose` - Why the file is being created (for error context)
pub fn safe_create_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            SynthError::io(
                format!("{}: failed to create directory for: {purpose}", parent.display()),
                e,
            )
        })?;
    }

    fs::File::create(path).map_err(|e| {
        let context = match e.kind() {
            io::ErrorKind::PermissionDenied => {
                format!("{}: permission denied - check directory permissions", path.display())
            }
            _ => format!("{}: failed to create file for: {purpose}", path.display()),
        };
        SynthError::io(context, e)
    })
}
