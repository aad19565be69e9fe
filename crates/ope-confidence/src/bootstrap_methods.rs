//! Bootstrap method implementations
//!
//! This module provides the bootstrap methods for constructing
//! confidence intervals from distributions of resample means.

use crate::{bootstrap::BootstrapMethod, ConfidenceInterval};
use ope_core::{Error, Result};

/// Sort a copy of the bootstrap distribution
fn sorted_estimates(bootstrap_estimates: &[f64]) -> Result<Vec<f64>> {
    if bootstrap_estimates.is_empty() {
        return Err(Error::InvalidInput("No bootstrap estimates".to_string()));
    }
    let mut sorted = bootstrap_estimates.to_vec();
    sorted.sort_by(f64::total_cmp);
    Ok(sorted)
}

/// Percentile of sorted data with linear interpolation between order statistics
///
/// `q` is a fraction in [0, 1]; position `q * (n - 1)` is interpolated.
pub(crate) fn interpolated_percentile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;
    sorted[lower] + fraction * (sorted[upper] - sorted[lower])
}

/// Lower and upper tail percentiles for a two-sided interval
fn tail_percentiles(sorted: &[f64], confidence_level: f64) -> (f64, f64) {
    let alpha = 1.0 - confidence_level;
    (
        interpolated_percentile(sorted, alpha / 2.0),
        interpolated_percentile(sorted, 1.0 - alpha / 2.0),
    )
}

/// Percentile bootstrap method
///
/// The simplest bootstrap method. Uses the empirical percentiles of the
/// bootstrap distribution to construct the confidence interval.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentileBootstrap;

impl BootstrapMethod for PercentileBootstrap {
    fn calculate_interval(
        &self,
        bootstrap_estimates: &[f64],
        original_estimate: f64,
        confidence_level: f64,
    ) -> Result<ConfidenceInterval> {
        let sorted = sorted_estimates(bootstrap_estimates)?;
        let (lower, upper) = tail_percentiles(&sorted, confidence_level);

        Ok(ConfidenceInterval::new(
            lower,
            upper,
            original_estimate,
            confidence_level,
        ))
    }

    fn name(&self) -> &'static str {
        "Percentile Bootstrap"
    }
}

/// Basic bootstrap method
///
/// Uses the reflection principle: if θ̂* is the bootstrap estimate and θ̂ is the
/// original estimate, then the interval is [2θ̂ - q_{1-α/2}, 2θ̂ - q_{α/2}]
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicBootstrap;

impl BootstrapMethod for BasicBootstrap {
    fn calculate_interval(
        &self,
        bootstrap_estimates: &[f64],
        original_estimate: f64,
        confidence_level: f64,
    ) -> Result<ConfidenceInterval> {
        let sorted = sorted_estimates(bootstrap_estimates)?;
        let (q_low, q_high) = tail_percentiles(&sorted, confidence_level);

        Ok(ConfidenceInterval::new(
            2.0 * original_estimate - q_high,
            2.0 * original_estimate - q_low,
            original_estimate,
            confidence_level,
        ))
    }

    fn name(&self) -> &'static str {
        "Basic Bootstrap"
    }
}
