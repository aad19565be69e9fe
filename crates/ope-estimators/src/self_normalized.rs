//! Self-Normalized Doubly Robust

use crate::doubly_robust::{corrected_values, corrected_values_tensor};
use crate::traits::PolicyValueEstimator;
use candle_core::{DType, Tensor};
use ndarray::Array1;
use ope_core::{LoggedBatch, Result, TensorBatch};

/// Self-Normalized Doubly Robust (SNDR)
///
/// DR with every importance weight divided by the batch mean weight.
/// With rewards in [0, 1] the estimate never exceeds 2. A batch whose mean
/// weight is zero has no correction and reduces to the Direct Method. When
/// some raw weights are infinite (subnormal propensities) the normalized
/// weights take their limit: `n / k` on each of the `k` infinite rounds and
/// 0 elsewhere.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SelfNormalizedDoublyRobust;

impl SelfNormalizedDoublyRobust {
    pub const NAME: &'static str = "sndr";

    pub fn new() -> Self {
        Self
    }
}

fn scalar(tensor: &Tensor) -> Result<f64> {
    Ok(tensor.to_dtype(DType::F64)?.to_scalar::<f64>()?)
}

impl PolicyValueEstimator for SelfNormalizedDoublyRobust {
    fn estimator_name(&self) -> &'static str {
        Self::NAME
    }

    fn estimate_round_rewards(&self, batch: &LoggedBatch) -> Array1<f64> {
        let weights = batch.importance_weights();
        let mean_weight = weights.iter().sum::<f64>() / weights.len() as f64;
        let normalized = if mean_weight == 0.0 {
            Array1::zeros(weights.len())
        } else if mean_weight.is_infinite() {
            let max = weights.fold(0.0, |m: f64, &w| m.max(w));
            let scaled = if max.is_infinite() {
                weights.mapv(|w| if w.is_infinite() { 1.0 } else { 0.0 })
            } else {
                weights / max
            };
            let scaled_mean = scaled.iter().sum::<f64>() / scaled.len() as f64;
            scaled / scaled_mean
        } else {
            weights / mean_weight
        };
        corrected_values(&batch.direct_method_values(), &normalized, &batch.residuals())
    }

    fn estimate_round_rewards_tensor(&self, batch: &TensorBatch) -> Result<Tensor> {
        let weights = batch.importance_weights()?;
        let mean_weight = weights.mean_all()?;
        let mean_value = scalar(&mean_weight)?;
        let normalized = if mean_value == 0.0 {
            weights.zeros_like()?
        } else if mean_value.is_infinite() {
            let max = scalar(&weights.max(0)?)?;
            let scaled = if max.is_infinite() {
                weights.eq(f64::INFINITY)?.to_dtype(weights.dtype())?
            } else {
                weights.affine(1.0 / max, 0.0)?
            };
            scaled.broadcast_div(&scaled.mean_all()?)?
        } else {
            weights.broadcast_div(&mean_weight)?
        };
        corrected_values_tensor(&batch.direct_method_values()?, &normalized, &batch.residuals()?)
    }
}
