//! Error handling for the analysis pipeline.

use std::io;
use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;

pub mod util;

/// Errors produced while loading data, fitting models or writing reports
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// Error opening, reading or writing a file
    #[error("IO error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Error decoding or encoding Arrow data
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error reading Parquet data
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// One or more required input columns are absent
    #[error("Required columns not found in input: {}", columns.join(", "))]
    MissingColumns { columns: Vec<String> },

    /// A cell is null, has the wrong type or lies outside its coding
    #[error("Invalid value in column '{column}' at row {row}: {detail}")]
    InvalidValue {
        column: String,
        row: usize,
        detail: String,
    },

    /// The input file extension is not a supported tabular format
    #[error("Unsupported input format for {}: expected .csv or .parquet", path.display())]
    UnsupportedFormat { path: PathBuf },

    /// An operation needs at least one observation
    #[error("Dataset is empty: {0}")]
    EmptyDataset(String),

    /// Too few rows or no outcome variation to fit the outcome model
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// IRLS did not reach the convergence criterion
    #[error("Outcome model did not converge after {iterations} iterations (deviance {deviance:.6})")]
    NonConvergence { iterations: usize, deviance: f64 },

    /// The weighted cross-product matrix could not be factorised
    #[error("Singular design: {0}")]
    SingularDesign(String),

    /// Configuration values out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The dedicated worker pool could not be started
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// Error serializing the JSON report or parsing a config file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AnalysisError {
    /// Wrap an IO error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build an `InvalidValue` error for a column and row
    pub fn invalid_value(column: &str, row: usize, detail: impl Into<String>) -> Self {
        Self::InvalidValue {
            column: column.to_string(),
            row,
            detail: detail.into(),
        }
    }
}

/// Result type for analysis operations
pub type Result<T> = std::result::Result<T, AnalysisError>;
