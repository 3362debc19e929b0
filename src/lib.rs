//! G-computation estimates of the effect of reducing black-carbon exposure on
//! preterm-birth risk, with percentile bootstrap intervals for the total
//! population and each race/ethnicity subgroup.

pub mod algorithm;
pub mod config;
pub mod error;
pub mod models;
pub mod reader;
pub mod report;
pub mod utils;

// Re-export the most common types for easier use
pub use config::{AnalysisConfig, FitOptions};
pub use error::{AnalysisError, Result};
pub use models::{Dataset, Education, Exposure, InfantSex, Observation, Race};
pub use reader::load_dataset;
pub use report::{EstimateRecord, Summary};

// Pipeline entry points
pub use algorithm::gcomp::{RiskContrast, Scenario, estimate_contrast, risk_contrast, standardized_risk};
pub use algorithm::outcome::{LogisticFit, Term};
pub use algorithm::population::{PopulationSlice, analyze_slice, run_analysis, run_slices};
