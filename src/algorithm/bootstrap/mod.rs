//! Percentile bootstrap: seeded resampling, replication engine, intervals

pub mod engine;
pub mod percentile;
pub mod resample;

pub use engine::{BootstrapResult, percentile_bootstrap, run_replications};
pub use percentile::{percentile_interval, quantile_linear_sorted};
pub use resample::{draw_indices, replication_rng, resample};
