//! Logging utilities for output and progress tracking

pub mod log;
pub mod progress;

// Re-export commonly used functions for convenience
pub use log::{log_operation_complete, log_operation_start, log_step, log_warning};
pub use progress::{abandon_progress_bar, create_replication_progress_bar, finish_progress_bar};
