//! Logging helpers
//!
//! Consistent `log` lines for file operations and pipeline steps.

use std::path::Path;
use std::time::Duration;

/// Log the start of a file operation
///
/// # Arguments
/// * `operation` - Description of the operation
/// * `path` - File being read or written
pub fn log_operation_start(operation: &str, path: &Path) {
    log::info!("{} {}", operation, path.display());
}

/// Log the completion of a file operation
///
/// # Arguments
/// * `operation` - Past-tense verb, e.g. "loaded"
/// * `path` - File that was read or written
/// * `rows` - Number of rows processed
/// * `elapsed` - Optional elapsed time
pub fn log_operation_complete(operation: &str, path: &Path, rows: usize, elapsed: Option<Duration>) {
    match elapsed {
        Some(duration) => log::info!(
            "Successfully {operation} {rows} rows for {} in {duration:?}",
            path.display()
        ),
        None => log::info!("Successfully {operation} {rows} rows for {}", path.display()),
    }
}

/// Log a numbered pipeline step for a population slice
pub fn log_step(slice: &str, step: usize, total_steps: usize, message: &str) {
    log::info!("[{slice}] [Step {step}/{total_steps}] {message}");
}

/// Log a warning, optionally tied to a path
///
/// # Arguments
/// * `message` - Warning message
/// * `path` - Optional path related to the warning
pub fn log_warning(message: &str, path: Option<&Path>) {
    if let Some(path) = path {
        log::warn!("{}: {}", message, path.display());
    } else {
        log::warn!("{message}");
    }
}
