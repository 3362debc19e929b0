//! Logistic regression of preterm birth by iteratively reweighted least squares
//!
//! Model: `logit P(preterm) = X β` with the columns of [`design`](super::design).
//! Fisher scoring coincides with Newton-Raphson for the canonical logit link.
//!
//! Columns that are linearly dependent on earlier columns are *aliased*: they
//! are left out of the solve and their coefficient is fixed at 0. A constant
//! exposure column is aliased with the intercept, so its effect is reported as
//! not identifiable instead of being estimated from noise.

use nalgebra::{DMatrix, DVector};

use crate::algorithm::outcome::design::{N_TERMS, TERMS, Term, design_matrix, encode};
use crate::config::FitOptions;
use crate::error::{AnalysisError, Result};
use crate::models::{Dataset, Observation};

/// Squared residual norm, relative to the column's own cross-product, below
/// which a column counts as linearly dependent on the preceding ones
pub const ALIAS_TOLERANCE: f64 = 1e-10;

/// Fitted probabilities closer than this to 0 or 1 are counted as boundary fits
pub const BOUNDARY_EPS: f64 = 10.0 * f64::EPSILON;

/// Numerically stable inverse logit
#[inline]
#[must_use]
pub fn sigmoid(eta: f64) -> f64 {
    if eta >= 0.0 {
        1.0 / (1.0 + (-eta).exp())
    } else {
        let e = eta.exp();
        e / (1.0 + e)
    }
}

/// Binomial deviance for 0/1 outcomes
fn binomial_deviance(y: &[f64], mu: &DVector<f64>) -> f64 {
    let loglik: f64 = y
        .iter()
        .zip(mu.iter())
        .map(|(&yi, &mi)| if yi > 0.5 { mi.ln() } else { (1.0 - mi).ln() })
        .sum();
    -2.0 * loglik
}

/// Flag design columns that are linearly dependent on earlier columns
///
/// Runs an incremental Cholesky factorisation of `XᵀX`, skipping every column
/// whose residual diagonal falls below [`ALIAS_TOLERANCE`].
#[must_use]
pub fn find_aliased(x: &DMatrix<f64>) -> Vec<bool> {
    let p = x.ncols();
    let xtx = x.tr_mul(x);
    let mut l = DMatrix::<f64>::zeros(p, p);
    let mut active: Vec<usize> = Vec::with_capacity(p);
    let mut aliased = vec![false; p];

    for j in 0..p {
        let diag = xtx[(j, j)];
        let mut residual = diag;
        for (pos, &k) in active.iter().enumerate() {
            let mut s = xtx[(j, k)];
            for &m in &active[..pos] {
                s -= l[(j, m)] * l[(k, m)];
            }
            let ljk = s / l[(k, k)];
            l[(j, k)] = ljk;
            residual -= ljk * ljk;
        }

        if diag <= 0.0 || residual <= ALIAS_TOLERANCE * diag {
            aliased[j] = true;
        } else {
            l[(j, j)] = residual.sqrt();
            active.push(j);
        }
    }

    aliased
}

struct IrlsOutcome {
    beta: DVector<f64>,
    eta: DVector<f64>,
    deviance: f64,
    iterations: usize,
}

fn irls(x: &DMatrix<f64>, y: &[f64], options: &FitOptions) -> Result<IrlsOutcome> {
    let (n, q) = x.shape();

    let mut mu = DVector::from_iterator(n, y.iter().map(|&yi| (yi + 0.5) / 2.0));
    let mut eta = mu.map(|m| (m / (1.0 - m)).ln());
    let mut dev_old = binomial_deviance(y, &mu);

    for iteration in 1..=options.max_iterations {
        let mut xtwx = DMatrix::<f64>::zeros(q, q);
        let mut xtwz = DVector::<f64>::zeros(q);

        for i in 0..n {
            let w = mu[i] * (1.0 - mu[i]);
            let z = eta[i] + (y[i] - mu[i]) / w;
            for a in 0..q {
                let wxa = w * x[(i, a)];
                xtwz[a] += wxa * z;
                for b in 0..=a {
                    xtwx[(a, b)] += wxa * x[(i, b)];
                }
            }
        }
        for a in 0..q {
            for b in 0..a {
                xtwx[(b, a)] = xtwx[(a, b)];
            }
        }

        let chol = xtwx.cholesky().ok_or_else(|| {
            AnalysisError::SingularDesign(format!(
                "weighted cross-product is not positive definite at iteration {iteration}"
            ))
        })?;
        let beta = chol.solve(&xtwz);

        eta = x * &beta;
        mu = eta.map(|e| sigmoid(e).clamp(f64::EPSILON, 1.0 - f64::EPSILON));
        let dev = binomial_deviance(y, &mu);

        if !dev.is_finite() {
            return Err(AnalysisError::NonConvergence {
                iterations: iteration,
                deviance: dev,
            });
        }
        if (dev - dev_old).abs() / (dev.abs() + 0.1) < options.tolerance {
            return Ok(IrlsOutcome {
                beta,
                eta,
                deviance: dev,
                iterations: iteration,
            });
        }
        dev_old = dev;
    }

    Err(AnalysisError::NonConvergence {
        iterations: options.max_iterations,
        deviance: dev_old,
    })
}

/// A fitted outcome model
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticFit {
    coefficients: [f64; N_TERMS],
    aliased: [bool; N_TERMS],
    deviance: f64,
    iterations: usize,
    boundary_fits: usize,
    n_obs: usize,
}

impl LogisticFit {
    /// Fit the outcome model to a dataset by maximum likelihood
    pub fn fit(dataset: &Dataset, options: &FitOptions) -> Result<Self> {
        if dataset.is_empty() {
            return Err(AnalysisError::EmptyDataset(
                "cannot fit the outcome model without observations".to_string(),
            ));
        }

        let n = dataset.len();
        let cases = dataset.preterm_count();
        if cases == 0 || cases == n {
            return Err(AnalysisError::InsufficientData(format!(
                "outcome has no variation ({cases} preterm births of {n})"
            )));
        }

        let x = design_matrix(dataset);
        let aliased_cols = find_aliased(&x);
        let active: Vec<usize> = (0..N_TERMS).filter(|&j| !aliased_cols[j]).collect();
        if n < active.len() {
            return Err(AnalysisError::InsufficientData(format!(
                "{n} observations for {} identifiable parameters",
                active.len()
            )));
        }

        let xa = x.select_columns(&active);
        let y: Vec<f64> = dataset.iter().map(Observation::outcome).collect();
        let outcome = irls(&xa, &y, options)?;

        let mut coefficients = [0.0; N_TERMS];
        for (k, &j) in active.iter().enumerate() {
            coefficients[j] = outcome.beta[k];
        }
        let mut aliased = [false; N_TERMS];
        aliased.copy_from_slice(&aliased_cols);

        let boundary_fits = outcome
            .eta
            .iter()
            .map(|&e| sigmoid(e))
            .filter(|&m| m < BOUNDARY_EPS || m > 1.0 - BOUNDARY_EPS)
            .count();

        log::debug!(
            "IRLS converged in {} iterations, deviance {:.4}, {} aliased terms",
            outcome.iterations,
            outcome.deviance,
            aliased.iter().filter(|&&a| a).count()
        );

        Ok(Self {
            coefficients,
            aliased,
            deviance: outcome.deviance,
            iterations: outcome.iterations,
            boundary_fits,
            n_obs: n,
        })
    }

    /// A model with fixed coefficients, in [`TERMS`] order
    #[must_use]
    pub const fn with_coefficients(coefficients: [f64; N_TERMS]) -> Self {
        Self {
            coefficients,
            aliased: [false; N_TERMS],
            deviance: f64::NAN,
            iterations: 0,
            boundary_fits: 0,
            n_obs: 0,
        }
    }

    /// Estimated coefficient, or `None` if the term is aliased or is the
    /// education reference level
    #[must_use]
    pub fn coefficient(&self, term: Term) -> Option<f64> {
        let j = term.index()?;
        (!self.aliased[j]).then_some(self.coefficients[j])
    }

    /// All coefficients in [`TERMS`] order; aliased terms are 0
    #[must_use]
    pub const fn coefficients(&self) -> &[f64; N_TERMS] {
        &self.coefficients
    }

    #[must_use]
    pub fn is_aliased(&self, term: Term) -> bool {
        term.index().is_some_and(|j| self.aliased[j])
    }

    #[must_use]
    pub fn aliased_terms(&self) -> Vec<Term> {
        TERMS
            .iter()
            .zip(self.aliased)
            .filter_map(|(&term, aliased)| aliased.then_some(term))
            .collect()
    }

    /// Whether the exposure effect is estimable from the data
    #[must_use]
    pub fn exposure_identified(&self) -> bool {
        !self.is_aliased(Term::BlackCarbon)
    }

    #[must_use]
    pub const fn deviance(&self) -> f64 {
        self.deviance
    }

    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    /// Number of fitted probabilities numerically 0 or 1
    #[must_use]
    pub const fn boundary_fits(&self) -> usize {
        self.boundary_fits
    }

    #[must_use]
    pub const fn n_obs(&self) -> usize {
        self.n_obs
    }

    #[must_use]
    pub fn linear_predictor(&self, obs: &Observation) -> f64 {
        encode(obs)
            .iter()
            .zip(&self.coefficients)
            .map(|(x, b)| x * b)
            .sum()
    }

    /// Predicted probability of preterm birth for one observation
    #[must_use]
    pub fn predict_one(&self, obs: &Observation) -> f64 {
        sigmoid(self.linear_predictor(obs))
    }

    /// Predicted probabilities for every row of a dataset
    #[must_use]
    pub fn predict(&self, dataset: &Dataset) -> Vec<f64> {
        dataset.iter().map(|obs| self.predict_one(obs)).collect()
    }
}
