//! Outcome model: logistic regression of preterm birth on exposure and covariates

pub mod design;
pub mod logistic;

pub use design::{N_TERMS, TERMS, Term};
pub use logistic::{LogisticFit, sigmoid};
