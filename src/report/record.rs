//! Per-population estimate records

use serde::{Deserialize, Serialize};

/// Decimal places of estimates and bounds in the summary table
pub const REPORT_DECIMALS: i32 = 4;

/// Round to [`REPORT_DECIMALS`] places
#[must_use]
pub fn round_report(value: f64) -> f64 {
    let scale = 10f64.powi(REPORT_DECIMALS);
    (value * scale).round() / scale
}

/// Point estimate and percentile interval of the risk difference for one population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateRecord {
    /// Population label, e.g. "Total" or "Black"
    pub population: String,
    /// Number of births in the population
    pub n: usize,
    /// Risk difference, low exposure minus current
    pub estimate: f64,
    pub lower: f64,
    pub upper: f64,
    /// Standardized risk under observed exposure
    pub current_risk: f64,
    /// Standardized risk with every birth below the threshold
    pub low_exposure_risk: f64,
    pub replications: usize,
    /// False when exposure was constant in the population and its effect aliased
    pub exposure_identified: bool,
}

impl EstimateRecord {
    /// Whether `lower <= estimate <= upper`
    #[must_use]
    pub fn covers_point_estimate(&self) -> bool {
        self.lower <= self.estimate && self.estimate <= self.upper
    }

    /// Estimate and bounds rounded for reporting
    #[must_use]
    pub fn rounded(&self) -> (f64, f64, f64) {
        (
            round_report(self.estimate),
            round_report(self.lower),
            round_report(self.upper),
        )
    }
}
