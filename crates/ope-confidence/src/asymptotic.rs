//! Asymptotic confidence intervals based on theoretical distributions

use crate::traits::{mean, IntervalEstimator};
use crate::types::{ConfidenceInterval, ConfidenceLevel};
use ope_core::{Error, Result};
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};
use tracing::instrument;

/// Asymptotic confidence interval estimator
///
/// Treats the mean of the per-round estimates as asymptotically normal with
/// standard error `sd / sqrt(n)`, using the sample standard deviation.
#[derive(Debug, Clone)]
pub struct AsymptoticCI {
    /// Confidence level
    confidence_level: ConfidenceLevel,
    /// Whether to use t-distribution (true) or normal (false)
    use_t_distribution: bool,
}

impl AsymptoticCI {
    /// Create a new asymptotic CI estimator using normal distribution
    pub fn normal(confidence_level: f64) -> Result<Self> {
        Ok(Self {
            confidence_level: ConfidenceLevel::new(confidence_level)?,
            use_t_distribution: false,
        })
    }

    /// Create a new asymptotic CI estimator using t-distribution
    pub fn students_t(confidence_level: f64) -> Result<Self> {
        Ok(Self {
            confidence_level: ConfidenceLevel::new(confidence_level)?,
            use_t_distribution: true,
        })
    }

    /// Two-sided critical value for `n` observations
    fn critical_value(&self, n: usize) -> Result<f64> {
        let p = 1.0 - self.confidence_level.tail_probability();
        if self.use_t_distribution {
            let t_dist = StudentsT::new(0.0, 1.0, (n - 1) as f64).map_err(|e| {
                Error::Computation(format!("Failed to create t-distribution: {}", e))
            })?;
            Ok(t_dist.inverse_cdf(p))
        } else {
            let normal = Normal::new(0.0, 1.0).map_err(|e| {
                Error::Computation(format!("Failed to create normal distribution: {}", e))
            })?;
            Ok(normal.inverse_cdf(p))
        }
    }
}

impl IntervalEstimator for AsymptoticCI {
    #[instrument(skip(self, samples), fields(n = samples.len()))]
    fn interval(&self, samples: &[f64]) -> Result<ConfidenceInterval> {
        let n = samples.len();
        if n < 2 {
            return Err(Error::InsufficientData {
                expected: 2,
                actual: n,
            });
        }

        let estimate = mean(samples);
        let variance = samples
            .iter()
            .map(|&x| (x - estimate).powi(2))
            .sum::<f64>()
            / (n - 1) as f64;
        let std_error = (variance / n as f64).sqrt();

        // Constant per-round estimates collapse to a point
        let margin = if std_error > 0.0 {
            self.critical_value(n)? * std_error
        } else {
            0.0
        };

        Ok(ConfidenceInterval::new(
            estimate - margin,
            estimate + margin,
            estimate,
            self.confidence_level.value(),
        ))
    }

    fn confidence_level(&self) -> f64 {
        self.confidence_level.value()
    }

    fn name(&self) -> &'static str {
        if self.use_t_distribution {
            "Asymptotic Student-t"
        } else {
            "Asymptotic Normal"
        }
    }
}
