//! Domain models for the birth-outcome analysis
//!
//! One `Observation` per birth, collected into an immutable `Dataset`.

pub mod dataset;
pub mod observation;

// Re-export commonly used types
pub use dataset::Dataset;
pub use observation::{Education, Exposure, InfantSex, Observation, Race};
