//! G-computation: standardized risks under counterfactual exposure scenarios

pub mod scenario;
pub mod standardize;

pub use scenario::Scenario;
pub use standardize::{RiskContrast, estimate_contrast, risk_contrast, standardized_risk};
