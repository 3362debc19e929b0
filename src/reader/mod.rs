//! Loading birth records from CSV or Parquet files
//!
//! Both formats are decoded into Arrow record batches first and then converted
//! into a `Dataset` by [`columns::batch_to_observations`].

pub mod columns;

use std::io::Seek;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::util::safe_open_file;
use crate::error::{AnalysisError, Result};
use crate::models::Dataset;
use crate::utils::logging::{log_operation_complete, log_operation_start, log_warning};

pub use columns::{REQUIRED_COLUMNS, UnclassifiedRaces};

/// Default batch size for reading
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Supported tabular input formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Csv,
    Parquet,
}

impl InputFormat {
    /// Detect the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("csv") => Ok(Self::Csv),
            Some("parquet" | "parq") => Ok(Self::Parquet),
            _ => Err(AnalysisError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

/// Read a CSV file with a header row into record batches
///
/// The schema is inferred from the whole file; columns are cast to their
/// expected types during conversion.
pub fn read_csv(path: &Path) -> Result<Vec<RecordBatch>> {
    let mut file = safe_open_file(path, "reading birth records")?;

    let format = Format::default().with_header(true);
    let (schema, _) = format.infer_schema(&mut file, None)?;
    file.rewind().map_err(|e| AnalysisError::io(path, e))?;

    let reader = ReaderBuilder::new(Arc::new(schema))
        .with_format(format)
        .with_batch_size(DEFAULT_BATCH_SIZE)
        .build(file)?;

    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>()?;
    Ok(batches)
}

/// Read a Parquet file into record batches
pub fn read_parquet(path: &Path) -> Result<Vec<RecordBatch>> {
    let file = safe_open_file(path, "reading birth records")?;

    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?
        .with_batch_size(DEFAULT_BATCH_SIZE)
        .build()?;

    let batches = reader.collect::<std::result::Result<Vec<_>, ArrowError>>()?;
    Ok(batches)
}

/// Convert record batches into a dataset
pub fn batches_to_dataset(batches: &[RecordBatch]) -> Result<Dataset> {
    let total_rows = batches.iter().map(RecordBatch::num_rows).sum();
    let mut observations = Vec::with_capacity(total_rows);
    let mut unclassified = UnclassifiedRaces::default();

    let mut row_offset = 0;
    for batch in batches {
        observations.extend(columns::batch_to_observations(
            batch,
            row_offset,
            &mut unclassified,
        )?);
        row_offset += batch.num_rows();
    }

    if !unclassified.is_empty() {
        let count: usize = unclassified.values().sum();
        let mut codes: Vec<_> = unclassified.keys().map(String::as_str).collect();
        codes.sort_unstable();
        log_warning(
            &format!(
                "{count} rows carry no reported race/ethnicity code (values: {codes:?}); \
                 they are kept in the total population only"
            ),
            None,
        );
    }

    Ok(Dataset::new(observations))
}

/// Load a dataset, choosing the reader by file extension
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    let start = Instant::now();
    log_operation_start("Loading birth records from", path);

    let batches = match InputFormat::from_path(path)? {
        InputFormat::Csv => read_csv(path)?,
        InputFormat::Parquet => read_parquet(path)?,
    };
    let dataset = batches_to_dataset(&batches)?;

    if dataset.is_empty() {
        return Err(AnalysisError::EmptyDataset(format!(
            "no rows in {}",
            path.display()
        )));
    }

    log_operation_complete("loaded", path, dataset.len(), Some(start.elapsed()));
    Ok(dataset)
}
