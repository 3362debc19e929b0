//! Standardized risks and the risk-difference contrast

use serde::{Deserialize, Serialize};

use crate::algorithm::gcomp::scenario::Scenario;
use crate::algorithm::outcome::LogisticFit;
use crate::config::FitOptions;
use crate::error::{AnalysisError, Result};
use crate::models::Dataset;

/// Mean predicted risk of `model` over the rows of `dataset`
pub fn standardized_risk(model: &LogisticFit, dataset: &Dataset) -> Result<f64> {
    if dataset.is_empty() {
        return Err(AnalysisError::EmptyDataset(
            "cannot standardize risk over an empty scenario".to_string(),
        ));
    }

    let total: f64 = dataset.iter().map(|obs| model.predict_one(obs)).sum();
    Ok((total / dataset.len() as f64).clamp(0.0, 1.0))
}

/// Standardized risks under both scenarios and their difference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskContrast {
    pub current_risk: f64,
    pub low_exposure_risk: f64,
    /// `low_exposure_risk - current_risk`
    pub risk_difference: f64,
}

/// Contrast the two scenarios built from `dataset` under one fitted model
pub fn risk_contrast(model: &LogisticFit, dataset: &Dataset) -> Result<RiskContrast> {
    let current_risk = standardized_risk(model, &Scenario::Current.apply(dataset))?;
    let low_exposure_risk = standardized_risk(model, &Scenario::LowExposure.apply(dataset))?;
    Ok(RiskContrast {
        current_risk,
        low_exposure_risk,
        risk_difference: low_exposure_risk - current_risk,
    })
}

/// Fit the outcome model to `dataset` and contrast its scenarios
///
/// This is the statistic recomputed on every bootstrap draw: the model is
/// always refit on the data it standardizes over.
pub fn estimate_contrast(dataset: &Dataset, options: &FitOptions) -> Result<(LogisticFit, RiskContrast)> {
    let model = LogisticFit::fit(dataset, options)?;
    let contrast = risk_contrast(&model, dataset)?;
    Ok((model, contrast))
}
