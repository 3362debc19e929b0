//! Writing the summary table and the JSON report

use std::io::Write;
use std::path::{Path, PathBuf};

use arrow::csv::WriterBuilder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::error::util::safe_create_file;
use crate::error::{AnalysisError, Result};
use crate::report::summary::Summary;
use crate::utils::logging::log_operation_complete;

/// Full-precision report of a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub generated_at: DateTime<Utc>,
    pub input: Option<PathBuf>,
    pub config: AnalysisConfig,
    #[serde(flatten)]
    pub summary: Summary,
}

impl AnalysisReport {
    #[must_use]
    pub fn new(summary: Summary, config: AnalysisConfig, input: Option<&Path>) -> Self {
        Self {
            generated_at: Utc::now(),
            input: input.map(Path::to_path_buf),
            config,
            summary,
        }
    }
}

/// Write the rounded summary table as CSV with a header row
pub fn write_summary_csv(summary: &Summary, path: &Path) -> Result<()> {
    let batch = summary.to_record_batch()?;
    let file = safe_create_file(path)?;

    let mut writer = WriterBuilder::new().with_header(true).build(file);
    writer.write(&batch)?;

    log_operation_complete("wrote", path, batch.num_rows(), None);
    Ok(())
}

/// Write the report as pretty-printed JSON
pub fn write_json_report(report: &AnalysisReport, path: &Path) -> Result<()> {
    let mut file = safe_create_file(path)?;
    serde_json::to_writer_pretty(&mut file, report)?;
    writeln!(file).map_err(|e| AnalysisError::io(path, e))?;

    log_operation_complete("wrote", path, report.summary.records.len(), None);
    Ok(())
}
