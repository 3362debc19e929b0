//! Estimation algorithms
//!
//! The outcome model, g-computation of standardized risks, the percentile
//! bootstrap, and the per-population pipeline that combines them.

pub mod bootstrap;
pub mod gcomp;
pub mod outcome;
pub mod population;
