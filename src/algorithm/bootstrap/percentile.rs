//! Percentile bootstrap intervals

use crate::error::{AnalysisError, Result};

/// Quantile of sorted data via linear interpolation between order statistics
///
/// - `q=0` returns min
/// - `q=1` returns max
/// - empty input returns `NaN`
#[must_use]
pub fn quantile_linear_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }

    let q = q.clamp(0.0, 1.0);
    let pos = q * (sorted.len() - 1) as f64;
    let i = pos.floor() as usize;
    let j = pos.ceil() as usize;
    if i == j {
        return sorted[i];
    }
    let t = pos - i as f64;
    (1.0 - t) * sorted[i] + t * sorted[j]
}

/// Two-sided percentile interval at `confidence_level`
pub fn percentile_interval(samples: &[f64], confidence_level: f64) -> Result<(f64, f64)> {
    if samples.len() < 2 {
        return Err(AnalysisError::InsufficientData(
            "percentile interval needs at least 2 bootstrap samples".to_string(),
        ));
    }
    if !(confidence_level.is_finite() && confidence_level > 0.0 && confidence_level < 1.0) {
        return Err(AnalysisError::InvalidConfig(format!(
            "confidence level must be in (0, 1), got {confidence_level}"
        )));
    }
    if let Some(bad) = samples.iter().find(|v| !v.is_finite()) {
        return Err(AnalysisError::InsufficientData(format!(
            "bootstrap samples must be finite, found {bad}"
        )));
    }

    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let alpha = (1.0 - confidence_level) / 2.0;
    let lo = quantile_linear_sorted(&sorted, alpha);
    let hi = quantile_linear_sorted(&sorted, 1.0 - alpha);
    Ok((lo.min(hi), lo.max(hi)))
}
