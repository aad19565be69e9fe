//! Doubly Robust with optimistic shrinkage

use crate::doubly_robust::{corrected_values, corrected_values_tensor};
use crate::traits::PolicyValueEstimator;
use candle_core::Tensor;
use ndarray::Array1;
use ope_core::{Hyperparameter, LoggedBatch, Result, TensorBatch};

/// Doubly Robust with Shrinkage (DRos)
///
/// Replaces the importance weight inside the DR correction with
/// `w λ / (w² + λ)`. The shrunk weight is exactly zero at `λ = 0` (the
/// estimate is the Direct Method) and the raw weight at `λ = inf` (the
/// estimate is DR); large finite `λ` approaches DR continuously. An
/// infinite raw weight, from a subnormal propensity, shrinks to 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DoublyRobustWithShrinkage {
    lambda: f64,
}

impl DoublyRobustWithShrinkage {
    pub const NAME: &'static str = "dr-os";

    /// Create with shrinkage hyperparameter `lambda`, a non-negative number
    pub fn new(lambda: impl Into<Hyperparameter>) -> Result<Self> {
        let lambda = lambda.into().non_negative("shrinkage hyperparameter")?;
        Ok(Self { lambda })
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    fn shrink(&self, weights: Array1<f64>) -> Array1<f64> {
        let lambda = self.lambda;
        if lambda == 0.0 {
            Array1::zeros(weights.len())
        } else if lambda.is_infinite() {
            weights
        } else {
            // w λ / (w² + λ), rearranged so w = 0 and w = inf both give 0
            weights.mapv(|w| lambda / (w + lambda / w))
        }
    }

    fn shrink_tensor(&self, weights: Tensor) -> Result<Tensor> {
        let lambda = self.lambda;
        if lambda == 0.0 {
            Ok(weights.zeros_like()?)
        } else if lambda.is_infinite() {
            Ok(weights)
        } else {
            let denominator = weights.sqr()?.affine(1.0, lambda)?;
            let shrunk = weights.affine(lambda, 0.0)?.div(&denominator)?;
            // inf / inf where the raw weight overflowed; its limit is 0
            let undefined = shrunk.ne(&shrunk)?;
            Ok(undefined.where_cond(&shrunk.zeros_like()?, &shrunk)?)
        }
    }
}

impl Default for DoublyRobustWithShrinkage {
    fn default() -> Self {
        Self { lambda: 0.0 }
    }
}

impl PolicyValueEstimator for DoublyRobustWithShrinkage {
    fn estimator_name(&self) -> &'static str {
        Self::NAME
    }

    fn estimate_round_rewards(&self, batch: &LoggedBatch) -> Array1<f64> {
        let shrunk = self.shrink(batch.importance_weights());
        corrected_values(&batch.direct_method_values(), &shrunk, &batch.residuals())
    }

    fn estimate_round_rewards_tensor(&self, batch: &TensorBatch) -> Result<Tensor> {
        let shrunk = self.shrink_tensor(batch.importance_weights()?)?;
        corrected_values_tensor(&batch.direct_method_values()?, &shrunk, &batch.residuals()?)
    }
}
