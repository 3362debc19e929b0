//! Utility functions for error handling
//!
//! Helpers that open and create files while keeping the offending path in the error.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{AnalysisError, Result};

/// Safely open a file with rich error information
///
/// # Arguments
/// * `path` - The path to the file to open
/// * `purpose` - Why the file is being opened (for error context)
///
/// # Returns
/// The opened file
pub fn safe_open_file(path: &Path, purpose: &str) -> Result<fs::File> {
    if !path.exists() {
        return Err(AnalysisError::io(
            path,
            io::Error::new(io::ErrorKind::NotFound, format!("file not found, needed for {purpose}")),
        ));
    }

    if !path.is_file() {
        return Err(AnalysisError::io(
            path,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("path is not a file, expected a file for {purpose}"),
            ),
        ));
    }

    fs::File::open(path).map_err(|e| AnalysisError::io(path, e))
}

/// Create (or truncate) an output file, creating missing parent directories
///
/// # Arguments
/// * `path` - The path of the file to create
///
/// # Returns
/// The opened file, or an IO error carrying the path that failed
pub fn safe_create_file(path: &Path) -> Result<fs::File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| AnalysisError::io(parent, e))?;
        }
    }

    fs::File::create(path).map_err(|e| AnalysisError::io(path, e))
}

/// Safely read a file to string with rich error information
///
/// # Arguments
/// * `path` - The path to the file to read
/// * `purpose` - Why the file is being read (for error context)
///
/// # Returns
/// The file contents as a string
pub fn safe_read_to_string(path: &Path, purpose: &str) -> Result<String> {
    let mut file = safe_open_file(path, purpose)?;

    let mut content = String::new();
    io::Read::read_to_string(&mut file, &mut content).map_err(|e| AnalysisError::io(path, e))?;
    Ok(content)
}
