//! Core trait for interval estimation over per-round estimates

use crate::types::ConfidenceInterval;
use ope_core::Result;

/// Builds a confidence interval from a vector of per-round estimates
///
/// Every off-policy estimator hands its per-round vector to an
/// implementation of this trait; the interval's `estimate` is the mean of
/// that vector. The trait is object safe so estimators can take
/// `&dyn IntervalEstimator`.
pub trait IntervalEstimator: Send + Sync {
    /// Calculate the confidence interval for the mean of `samples`
    fn interval(&self, samples: &[f64]) -> Result<ConfidenceInterval>;

    /// Get the confidence level
    fn confidence_level(&self) -> f64;

    /// Method name for logging
    fn name(&self) -> &'static str;
}

/// Arithmetic mean, the point estimate every interval reports
pub(crate) fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}
