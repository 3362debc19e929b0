//! Per-population estimation pipeline
//!
//! For each slice: select rows, fit the outcome model, standardize risk under
//! both scenarios, bootstrap the risk difference with a refit on every draw,
//! and return an [`EstimateRecord`]. Slices share nothing but the read-only
//! input dataset.

use std::time::Instant;

use log::{debug, info, warn};

use crate::algorithm::bootstrap::{BootstrapResult, percentile_bootstrap};
use crate::algorithm::gcomp::{RiskContrast, estimate_contrast};
use crate::algorithm::outcome::{LogisticFit, Term};
use crate::algorithm::population::slice::PopulationSlice;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::{Dataset, Exposure};
use crate::report::{EstimateRecord, SliceFailure, Summary};
use crate::utils::logging::log_step;

const TOTAL_STEPS: usize = 3;

/// Everything produced for one population slice
#[derive(Debug, Clone)]
pub struct SliceEstimate {
    pub slice: PopulationSlice,
    pub record: EstimateRecord,
    /// Outcome model fit on the unresampled slice
    pub model: LogisticFit,
    pub contrast: RiskContrast,
    pub bootstrap: BootstrapResult,
}

/// Run the full pipeline on one population slice
pub fn analyze_slice(
    dataset: &Dataset,
    slice: PopulationSlice,
    config: &AnalysisConfig,
) -> Result<SliceEstimate> {
    let label = slice.label();
    let rows = slice.select(dataset);
    log_step(
        label,
        1,
        TOTAL_STEPS,
        &format!(
            "Fitting outcome model on {} births ({} preterm, {} above {} mg/m³)",
            rows.len(),
            rows.preterm_count(),
            rows.exposed_count(),
            Exposure::THRESHOLD_MG_M3
        ),
    );

    let (model, contrast) = estimate_contrast(&rows, &config.fit)?;
    debug!(
        "[{label}] outcome model on {} births: deviance {:.4} after {} iterations",
        model.n_obs(),
        model.deviance(),
        model.iterations()
    );
    if !model.exposure_identified() {
        warn!(
            "[{label}] black-carbon exposure does not vary; its effect is not identifiable and the risk difference is 0"
        );
    }
    let other_aliased: Vec<_> = model
        .aliased_terms()
        .into_iter()
        .filter(|&term| term != Term::BlackCarbon)
        .map(Term::name)
        .collect();
    if !other_aliased.is_empty() {
        warn!("[{label}] aliased terms dropped from the model: {other_aliased:?}");
    }
    if model.boundary_fits() > 0 {
        warn!(
            "[{label}] {} fitted probabilities numerically 0 or 1",
            model.boundary_fits()
        );
    }

    log_step(
        label,
        2,
        TOTAL_STEPS,
        &format!(
            "Risk difference {:.4} (current {:.4}, low exposure {:.4}); running {} replications",
            contrast.risk_difference,
            contrast.current_risk,
            contrast.low_exposure_risk,
            config.replications
        ),
    );

    let fit_options = config.fit;
    let bootstrap = percentile_bootstrap(
        &rows,
        config,
        label,
        contrast.risk_difference,
        |draw| estimate_contrast(draw, &fit_options).map(|(_, c)| c.risk_difference),
    )?;

    let record = EstimateRecord {
        population: label.to_string(),
        n: rows.len(),
        estimate: contrast.risk_difference,
        lower: bootstrap.lower,
        upper: bootstrap.upper,
        current_risk: contrast.current_risk,
        low_exposure_risk: contrast.low_exposure_risk,
        replications: bootstrap.replications(),
        exposure_identified: model.exposure_identified(),
    };
    if !record.covers_point_estimate() {
        warn!(
            "[{label}] percentile interval [{:.4}, {:.4}] does not contain the point estimate {:.4}",
            record.lower, record.upper, record.estimate
        );
    }

    log_step(
        label,
        3,
        TOTAL_STEPS,
        &format!(
            "{:.0}% interval [{:.4}, {:.4}]",
            config.confidence_level * 100.0,
            record.lower,
            record.upper
        ),
    );

    Ok(SliceEstimate {
        slice,
        record,
        model,
        contrast,
        bootstrap,
    })
}

/// Analyse the given slices in order
///
/// A failing slice is recorded in [`Summary::failures`] and does not stop the
/// remaining slices.
pub fn run_slices(dataset: &Dataset, slices: &[PopulationSlice], config: &AnalysisConfig) -> Summary {
    let start = Instant::now();
    let mut summary = Summary::default();

    for &slice in slices {
        match analyze_slice(dataset, slice, config) {
            Ok(estimate) => summary.records.push(estimate.record),
            Err(e) => {
                warn!("[{}] analysis failed: {e}", slice.label());
                summary.failures.push(SliceFailure {
                    population: slice.label().to_string(),
                    error: e.to_string(),
                });
            }
        }
    }

    info!(
        "Analysed {} populations ({} failed) in {:?}",
        slices.len(),
        summary.failures.len(),
        start.elapsed()
    );
    summary
}

/// Total population followed by every race/ethnicity subgroup
pub fn run_analysis(dataset: &Dataset, config: &AnalysisConfig) -> Summary {
    run_slices(dataset, &PopulationSlice::all(), config)
}
