//! Switch Doubly Robust

use crate::doubly_robust::corrected_values;
use crate::traits::PolicyValueEstimator;
use candle_core::Tensor;
use ndarray::Array1;
use ope_core::{Error, Hyperparameter, LoggedBatch, OpeInputs, Result, TensorBatch};
use tracing::debug;

const INDIFFERENTIABLE: &str = "This is not implemented for Switch-DR because it is indifferentiable.";

fn indifferentiable() -> Error {
    Error::NotImplemented(INDIFFERENTIABLE.to_string())
}

/// Switch Doubly Robust (Switch-DR)
///
/// Applies the DR correction only on rounds whose importance weight is at
/// most `tau`; the remaining rounds keep the Direct Method value.
/// `tau = 0` reproduces DM and `tau = inf` reproduces DR.
///
/// The hard threshold has no useful gradient, so the tensor entry point
/// always fails with [`Error::NotImplemented`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwitchDoublyRobust {
    tau: f64,
}

impl SwitchDoublyRobust {
    pub const NAME: &'static str = "switch-dr";

    /// Create with switching threshold `tau`, a non-negative number
    pub fn new(tau: impl Into<Hyperparameter>) -> Result<Self> {
        let tau = tau.into().non_negative("switching hyperparameter")?;
        Ok(Self { tau })
    }

    pub fn tau(&self) -> f64 {
        self.tau
    }
}

impl Default for SwitchDoublyRobust {
    fn default() -> Self {
        Self { tau: f64::INFINITY }
    }
}

impl PolicyValueEstimator for SwitchDoublyRobust {
    fn estimator_name(&self) -> &'static str {
        Self::NAME
    }

    fn estimate_round_rewards(&self, batch: &LoggedBatch) -> Array1<f64> {
        let weights = batch.importance_weights();
        let switched = weights.mapv(|w| if w <= self.tau { w } else { 0.0 });
        debug!(
            tau = self.tau,
            fallback_rounds = weights.iter().filter(|&&w| w > self.tau).count(),
            "switch-dr rounds using the direct method"
        );
        corrected_values(&batch.direct_method_values(), &switched, &batch.residuals())
    }

    fn estimate_round_rewards_tensor(&self, _batch: &TensorBatch) -> Result<Tensor> {
        Err(indifferentiable())
    }

    /// Always fails, before any argument is inspected
    fn estimate_policy_value_tensor(&self, _inputs: &OpeInputs<Tensor>) -> Result<Tensor> {
        Err(indifferentiable())
    }
}
