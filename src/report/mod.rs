//! Estimate records, the cross-population summary, and output writers

pub mod record;
pub mod summary;
pub mod writer;

pub use record::{EstimateRecord, REPORT_DECIMALS, round_report};
pub use summary::{SliceFailure, Summary};
pub use writer::{AnalysisReport, write_json_report, write_summary_csv};
