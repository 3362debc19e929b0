//! Population slices and the per-population estimation pipeline

pub mod pipeline;
pub mod slice;

// Re-export commonly used items
pub use pipeline::{SliceEstimate, analyze_slice, run_analysis, run_slices};
pub use slice::{FilterCriteria, PopulationSlice};
