//! The contract every off-policy estimator implements
//!
//! An estimator only supplies its per-round rule; validation, argument
//! checks and the reduction to a policy value or an interval are provided.

use candle_core::Tensor;
use ndarray::Array1;
use ope_confidence::{ConfidenceInterval, IntervalEstimator};
use ope_core::{LoggedBatch, NdArray, OpeInputs, Result, TensorBatch};
use tracing::{debug, instrument};

/// Mean of a per-round vector, accumulated in round order
///
/// Interval estimators accumulate in the same order, so an interval's
/// `estimate` equals the policy value bit for bit.
pub(crate) fn round_mean(round_rewards: &Array1<f64>) -> f64 {
    round_rewards.iter().sum::<f64>() / round_rewards.len() as f64
}

/// An off-policy estimator of the value of an evaluation policy
pub trait PolicyValueEstimator: Send + Sync {
    /// Identity used for logging and dispatch (`"dm"`, `"dr"`, ...)
    fn estimator_name(&self) -> &'static str;

    /// Per-round estimates on a validated numeric batch
    fn estimate_round_rewards(&self, batch: &LoggedBatch) -> Array1<f64>;

    /// Per-round estimates on a validated tensor batch, shape (n_rounds,)
    fn estimate_round_rewards_tensor(&self, batch: &TensorBatch) -> Result<Tensor>;

    /// Estimate the policy value as the mean of the per-round estimates
    #[instrument(skip(self, inputs), fields(estimator = self.estimator_name()))]
    fn estimate_policy_value(&self, inputs: &OpeInputs<NdArray>) -> Result<f64> {
        inputs.require("estimate_policy_value")?;
        let batch = LoggedBatch::from_inputs(inputs)?;
        let value = round_mean(&self.estimate_round_rewards(&batch));
        debug!(n_rounds = batch.n_rounds(), value, "estimated policy value");
        Ok(value)
    }

    /// Estimate a confidence interval of the policy value
    ///
    /// The per-round estimates are the resampling unit handed to
    /// `interval_estimator`.
    #[instrument(skip(self, inputs, interval_estimator), fields(estimator = self.estimator_name(), method = interval_estimator.name()))]
    fn estimate_interval(
        &self,
        inputs: &OpeInputs<NdArray>,
        interval_estimator: &dyn IntervalEstimator,
    ) -> Result<ConfidenceInterval> {
        inputs.require("estimate_interval")?;
        let batch = LoggedBatch::from_inputs(inputs)?;
        let round_rewards = self.estimate_round_rewards(&batch);
        interval_estimator.interval(&round_rewards.to_vec())
    }

    /// Estimate the policy value on the differentiable back-end
    ///
    /// Returns a zero-dimensional tensor connected to the autodiff graph of
    /// the inputs.
    #[instrument(skip(self, inputs), fields(estimator = self.estimator_name()))]
    fn estimate_policy_value_tensor(&self, inputs: &OpeInputs<Tensor>) -> Result<Tensor> {
        inputs.require("estimate_policy_value_tensor")?;
        let batch = TensorBatch::from_inputs(inputs)?;
        Ok(self.estimate_round_rewards_tensor(&batch)?.mean_all()?)
    }
}
