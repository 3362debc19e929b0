//! Shared utilities: logging and progress reporting

pub mod logging;
