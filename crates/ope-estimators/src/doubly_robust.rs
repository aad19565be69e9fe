//! Doubly Robust estimation and the correction term its variants share

use crate::traits::PolicyValueEstimator;
use candle_core::Tensor;
use ndarray::Array1;
use ope_core::{LoggedBatch, Result, TensorBatch};

/// `dm_i + weight_i * residual_i`, the doubly robust per-round value
///
/// Every DR variant differs only in the weight it passes here; a zero
/// weight returns the Direct Method value unchanged.
pub(crate) fn corrected_values(
    dm: &Array1<f64>,
    weights: &Array1<f64>,
    residuals: &Array1<f64>,
) -> Array1<f64> {
    dm + &(weights * residuals)
}

/// Tensor counterpart of [`corrected_values`]
pub(crate) fn corrected_values_tensor(
    dm: &Tensor,
    weights: &Tensor,
    residuals: &Tensor,
) -> Result<Tensor> {
    Ok(dm.add(&weights.mul(residuals)?)?)
}

/// Doubly Robust (DR)
///
/// Adds the importance-weighted residual of the logged action to the
/// Direct Method value:
///
/// `V̂_DR = mean_i [ q̂(x_i, π_e) + w_i (r_i - q̂(x_i, a_i)) ]`,
/// `w_i = π_e(a_i|x_i) / π_b(a_i|x_i)`.
///
/// Unbiased when either the reward model or the propensities are correct.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DoublyRobust;

impl DoublyRobust {
    pub const NAME: &'static str = "dr";

    pub fn new() -> Self {
        Self
    }
}

impl PolicyValueEstimator for DoublyRobust {
    fn estimator_name(&self) -> &'static str {
        Self::NAME
    }

    fn estimate_round_rewards(&self, batch: &LoggedBatch) -> Array1<f64> {
        corrected_values(
            &batch.direct_method_values(),
            &batch.importance_weights(),
            &batch.residuals(),
        )
    }

    fn estimate_round_rewards_tensor(&self, batch: &TensorBatch) -> Result<Tensor> {
        corrected_values_tensor(
            &batch.direct_method_values()?,
            &batch.importance_weights()?,
            &batch.residuals()?,
        )
    }
}
