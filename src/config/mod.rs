//! Configuration for the g-computation analysis.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::util::safe_read_to_string;
use crate::error::{AnalysisError, Result};

/// Default number of bootstrap replications
pub const DEFAULT_REPLICATIONS: usize = 10_000;

/// Default seed for the resampling sequence
pub const DEFAULT_SEED: u64 = 1234;

/// Options controlling the IRLS fit of the outcome model
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitOptions {
    /// Maximum number of IRLS iterations
    pub max_iterations: usize,
    /// Relative deviance change below which the fit is converged
    pub tolerance: f64,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            max_iterations: 25,
            tolerance: 1e-8,
        }
    }
}

/// Configuration for a full analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of bootstrap replications per population slice
    pub replications: usize,
    /// Base seed; replication `r` uses `seed + r`
    pub seed: u64,
    /// Two-sided confidence level of the percentile interval
    pub confidence_level: f64,
    /// Outcome model fit options
    pub fit: FitOptions,
    /// Worker threads for the bootstrap (0 = global rayon pool)
    pub threads: usize,
    /// Whether to run replications in parallel
    pub use_parallel: bool,
    /// Whether to draw progress bars
    pub show_progress: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            replications: DEFAULT_REPLICATIONS,
            seed: DEFAULT_SEED,
            confidence_level: 0.95,
            fit: FitOptions::default(),
            threads: 0,
            use_parallel: true,
            show_progress: true,
        }
    }
}

impl AnalysisConfig {
    /// Create a new builder for constructing an analysis configuration
    #[must_use]
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::new()
    }

    /// Load a configuration from a JSON file; absent keys keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = safe_read_to_string(path, "reading analysis configuration")?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that all values are in range
    pub fn validate(&self) -> Result<()> {
        if self.replications < 2 {
            return Err(AnalysisError::InvalidConfig(format!(
                "at least 2 bootstrap replications are required, got {}",
                self.replications
            )));
        }
        if !(self.confidence_level.is_finite()
            && self.confidence_level > 0.0
            && self.confidence_level < 1.0)
        {
            return Err(AnalysisError::InvalidConfig(format!(
                "confidence level must be in (0, 1), got {}",
                self.confidence_level
            )));
        }
        if self.fit.max_iterations == 0 {
            return Err(AnalysisError::InvalidConfig(
                "max_iterations must be positive".to_string(),
            ));
        }
        if !(self.fit.tolerance.is_finite() && self.fit.tolerance > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "tolerance must be positive, got {}",
                self.fit.tolerance
            )));
        }
        Ok(())
    }
}

impl fmt::Display for AnalysisConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Analysis Configuration:")?;
        writeln!(f, "  Bootstrap Replications: {}", self.replications)?;
        writeln!(f, "  Seed: {}", self.seed)?;
        writeln!(f, "  Confidence Level: {}", self.confidence_level)?;
        writeln!(
            f,
            "  IRLS: max {} iterations, tolerance {:e}",
            self.fit.max_iterations, self.fit.tolerance
        )?;
        if self.use_parallel {
            if self.threads == 0 {
                writeln!(f, "  Parallel: yes (global pool)")?;
            } else {
                writeln!(f, "  Parallel: yes ({} threads)", self.threads)?;
            }
        } else {
            writeln!(f, "  Parallel: no")?;
        }
        Ok(())
    }
}

/// Builder for constructing an analysis configuration
#[derive(Debug, Clone)]
pub struct AnalysisConfigBuilder {
    config: AnalysisConfig,
}

impl Default for AnalysisConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisConfigBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    /// Start from an existing configuration
    #[must_use]
    pub const fn from_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Set the number of bootstrap replications
    #[must_use]
    pub const fn replications(mut self, replications: usize) -> Self {
        self.config.replications = replications;
        self
    }

    /// Set the base seed
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Set the confidence level of the interval
    #[must_use]
    pub const fn confidence_level(mut self, level: f64) -> Self {
        self.config.confidence_level = level;
        self
    }

    /// Set every outcome-model fitting option at once
    #[must_use]
    pub const fn fit(mut self, fit: FitOptions) -> Self {
        self.config.fit = fit;
        self
    }

    /// Set the maximum number of IRLS iterations
    #[must_use]
    pub const fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.config.fit.max_iterations = max_iterations;
        self
    }

    /// Set the IRLS convergence tolerance
    #[must_use]
    pub const fn tolerance(mut self, tolerance: f64) -> Self {
        self.config.fit.tolerance = tolerance;
        self
    }

    /// Set the number of worker threads (0 = global pool)
    #[must_use]
    pub const fn threads(mut self, threads: usize) -> Self {
        self.config.threads = threads;
        self
    }

    /// Set whether replications run in parallel
    #[must_use]
    pub const fn use_parallel(mut self, use_parallel: bool) -> Self {
        self.config.use_parallel = use_parallel;
        self
    }

    /// Set whether progress bars are drawn
    #[must_use]
    pub const fn show_progress(mut self, show_progress: bool) -> Self {
        self.config.show_progress = show_progress;
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<AnalysisConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
