//! Direct Method

use crate::traits::PolicyValueEstimator;
use candle_core::Tensor;
use ndarray::Array1;
use ope_core::{LoggedBatch, Result, TensorBatch};

/// Direct Method (DM)
///
/// Scores the evaluation policy with the reward model alone:
/// `Σ_a π_e(a|x_i, p_i) q̂(x_i, a, p_i)` per round. Observed rewards,
/// actions and propensities are validated but do not enter the estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DirectMethod;

impl DirectMethod {
    pub const NAME: &'static str = "dm";

    pub fn new() -> Self {
        Self
    }
}

impl PolicyValueEstimator for DirectMethod {
    fn estimator_name(&self) -> &'static str {
        Self::NAME
    }

    fn estimate_round_rewards(&self, batch: &LoggedBatch) -> Array1<f64> {
        batch.direct_method_values()
    }

    fn estimate_round_rewards_tensor(&self, batch: &TensorBatch) -> Result<Tensor> {
        batch.direct_method_values()
    }
}
