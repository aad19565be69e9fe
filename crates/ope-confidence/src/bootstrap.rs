//! Nonparametric bootstrap over per-round estimates
//!
//! Each resample draws `n` per-round estimates with replacement and records
//! their mean. The distribution of resample means is turned into an
//! interval by a [`BootstrapMethod`]. A master `StdRng` seeded once per call
//! draws one seed per resample up front, and resample `i` runs on its own
//! `StdRng` from seed `i`. Results therefore do not depend on whether the
//! resamples run sequentially or on the rayon pool (`parallel` feature).

use crate::bootstrap_methods::PercentileBootstrap;
use crate::traits::{mean, IntervalEstimator};
use crate::types::{ConfidenceInterval, ConfidenceLevel};
use ope_core::{Error, Result};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Default number of bootstrap resamples
pub const DEFAULT_RESAMPLES: usize = 10_000;

/// Bootstrap method for calculating confidence intervals
///
/// This trait defines how to construct a confidence interval from
/// bootstrap estimates. Different methods (percentile, basic) implement
/// this trait.
pub trait BootstrapMethod: Clone + Send + Sync {
    /// Calculate confidence interval from bootstrap distribution
    fn calculate_interval(
        &self,
        bootstrap_estimates: &[f64],
        original_estimate: f64,
        confidence_level: f64,
    ) -> Result<ConfidenceInterval>;

    /// Method name for documentation
    fn name(&self) -> &'static str;
}

/// Bootstrap interval estimator
#[derive(Debug, Clone)]
pub struct Bootstrap<M = PercentileBootstrap> {
    method: M,
    n_resamples: usize,
    confidence_level: f64,
    seed: Option<u64>,
}

impl<M: BootstrapMethod> Bootstrap<M> {
    /// Create a new bootstrap engine with 10000 resamples at 95% confidence
    pub fn new(method: M) -> Self {
        Self {
            method,
            n_resamples: DEFAULT_RESAMPLES,
            confidence_level: 0.95,
            seed: None,
        }
    }

    /// Set the number of bootstrap resamples
    pub fn with_resamples(mut self, n_resamples: usize) -> Self {
        self.n_resamples = n_resamples;
        self
    }

    /// Set the confidence level
    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    /// Set random seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn n_resamples(&self) -> usize {
        self.n_resamples
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn method(&self) -> &M {
        &self.method
    }

    /// Check the configured parameters
    ///
    /// The builder methods do not fail; invalid values are reported here
    /// and by every call to [`IntervalEstimator::interval`].
    pub fn validate(&self) -> Result<()> {
        ConfidenceLevel::new(self.confidence_level)?;
        if self.n_resamples == 0 {
            return Err(Error::InvalidParameter(
                "n_resamples must be a positive integer".to_string(),
            ));
        }
        Ok(())
    }

    /// Mean of a single resample drawn with its own generator
    fn resample_mean(samples: &[f64], seed: u64) -> f64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let n = samples.len();
        let total: f64 = (0..n).map(|_| samples[rng.gen_range(0..n)]).sum();
        total / n as f64
    }

    /// Per-resample seeds drawn from one master generator
    fn resample_seeds(&self) -> Vec<u64> {
        let mut master = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        (0..self.n_resamples).map(|_| master.gen()).collect()
    }

    /// Means of all resamples
    fn resample_means(&self, samples: &[f64]) -> Vec<f64> {
        let seeds = self.resample_seeds();

        debug!(
            "Generating {} bootstrap resamples of size {}",
            self.n_resamples,
            samples.len()
        );

        #[cfg(feature = "parallel")]
        let means = {
            use rayon::prelude::*;
            seeds
                .into_par_iter()
                .map(|seed| Self::resample_mean(samples, seed))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let means = seeds
            .into_iter()
            .map(|seed| Self::resample_mean(samples, seed))
            .collect();

        means
    }
}

impl Default for Bootstrap<PercentileBootstrap> {
    fn default() -> Self {
        Self::new(PercentileBootstrap)
    }
}

impl<M: BootstrapMethod> IntervalEstimator for Bootstrap<M> {
    #[instrument(skip(self, samples), fields(n = samples.len(), n_resamples = self.n_resamples, method = self.method.name()))]
    fn interval(&self, samples: &[f64]) -> Result<ConfidenceInterval> {
        self.validate()?;
        if samples.is_empty() {
            return Err(Error::InsufficientData {
                expected: 1,
                actual: 0,
            });
        }

        let original = mean(samples);
        let means = self.resample_means(samples);

        debug!("Bootstrap completed, calculating confidence interval");
        self.method
            .calculate_interval(&means, original, self.confidence_level)
    }

    fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    fn name(&self) -> &'static str {
        self.method.name()
    }
}

fn default_confidence_level() -> f64 {
    0.95
}

fn default_resamples() -> usize {
    DEFAULT_RESAMPLES
}

/// Serializable bootstrap settings
///
/// ```json
/// {"confidence_level": 0.9, "n_resamples": 2000, "seed": 12345}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    #[serde(default = "default_confidence_level")]
    pub confidence_level: f64,
    #[serde(default = "default_resamples")]
    pub n_resamples: usize,
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            confidence_level: default_confidence_level(),
            n_resamples: default_resamples(),
            seed: None,
        }
    }
}

impl BootstrapConfig {
    /// Build a validated percentile bootstrap
    pub fn build(&self) -> Result<Bootstrap<PercentileBootstrap>> {
        let mut bootstrap = Bootstrap::new(PercentileBootstrap)
            .with_resamples(self.n_resamples)
            .with_confidence_level(self.confidence_level);
        if let Some(seed) = self.seed {
            bootstrap = bootstrap.with_seed(seed);
        }
        bootstrap.validate()?;
        Ok(bootstrap)
    }
}
