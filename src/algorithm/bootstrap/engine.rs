//! Bootstrap replication engine
//!
//! Replications are independent: each one draws its own resample from a stream
//! seeded by `seed + replication`, evaluates the statistic on it, and writes to
//! its own output slot. Running them on one thread or many gives identical
//! results.

use std::time::Instant;

use indicatif::{ParallelProgressIterator, ProgressBar, ProgressIterator};
use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithm::bootstrap::percentile::percentile_interval;
use crate::algorithm::bootstrap::resample::{replication_rng, resample};
use crate::config::AnalysisConfig;
use crate::error::{AnalysisError, Result};
use crate::models::Dataset;
use crate::utils::logging::{
    abandon_progress_bar, create_replication_progress_bar, finish_progress_bar,
};

/// Percentile bootstrap of a scalar statistic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapResult {
    /// Statistic on the unresampled data
    pub point_estimate: f64,
    pub lower: f64,
    pub upper: f64,
    pub confidence_level: f64,
    /// Replicate values in replication order
    pub replicates: Vec<f64>,
}

impl BootstrapResult {
    #[must_use]
    pub fn replications(&self) -> usize {
        self.replicates.len()
    }

    /// Whether the interval contains the point estimate
    #[must_use]
    pub fn covers_point_estimate(&self) -> bool {
        self.lower <= self.point_estimate && self.point_estimate <= self.upper
    }
}

/// Evaluate `statistic` on `config.replications` resample draws of `dataset`
///
/// The first failing replication (lowest index) aborts the run.
pub fn run_replications<F>(
    dataset: &Dataset,
    config: &AnalysisConfig,
    label: &str,
    statistic: F,
) -> Result<Vec<f64>>
where
    F: Fn(&Dataset) -> Result<f64> + Sync,
{
    if dataset.is_empty() {
        return Err(AnalysisError::EmptyDataset(format!(
            "cannot resample an empty dataset for {label}"
        )));
    }

    let replications = config.replications;
    let start = Instant::now();
    let pb = create_replication_progress_bar(
        replications as u64,
        Some(&format!("Bootstrap: {label}")),
        config.show_progress,
    );

    let replicate = |replication: usize| -> Result<f64> {
        let mut rng = replication_rng(config.seed, replication);
        let draw = resample(dataset, &mut rng);
        statistic(&draw)
    };

    let outcomes: Result<Vec<Result<f64>>> = if config.use_parallel {
        let run = || -> Vec<Result<f64>> {
            (0..replications)
                .into_par_iter()
                .progress_with(pb.clone())
                .map(&replicate)
                .collect()
        };
        if config.threads > 0 {
            rayon::ThreadPoolBuilder::new()
                .num_threads(config.threads)
                .build()
                .map(|pool| pool.install(run))
                .map_err(AnalysisError::from)
        } else {
            Ok(run())
        }
    } else {
        Ok((0..replications)
            .progress_with(pb.clone())
            .map(&replicate)
            .collect())
    };

    let values = close_progress(
        &pb,
        label,
        outcomes.and_then(|o| o.into_iter().collect::<Result<Vec<f64>>>()),
    )?;
    info!(
        "[{label}] {replications} bootstrap replications in {:?}",
        start.elapsed()
    );

    Ok(values)
}

/// Finish the bar on success, abandon it on failure, and pass the result on
fn close_progress<T>(pb: &ProgressBar, label: &str, result: Result<T>) -> Result<T> {
    match &result {
        Ok(_) => finish_progress_bar(pb, Some(&format!("Bootstrap complete: {label}"))),
        Err(e) => abandon_progress_bar(pb, &format!("Bootstrap failed: {label}: {e}")),
    }
    result
}

/// Percentile bootstrap around a precomputed point estimate
pub fn percentile_bootstrap<F>(
    dataset: &Dataset,
    config: &AnalysisConfig,
    label: &str,
    point_estimate: f64,
    statistic: F,
) -> Result<BootstrapResult>
where
    F: Fn(&Dataset) -> Result<f64> + Sync,
{
    let replicates = run_replications(dataset, config, label, statistic)?;
    let (lower, upper) = percentile_interval(&replicates, config.confidence_level)?;

    Ok(BootstrapResult {
        point_estimate,
        lower,
        upper,
        confidence_level: config.confidence_level,
        replicates,
    })
}
