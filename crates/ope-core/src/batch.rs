//! Validated logged batches and the per-round quantities estimators share
//!
//! Every estimator in the family is built from three per-round vectors:
//!
//! - the Direct Method value `Σ_a π_e(a|x_i, p_i) q̂(x_i, a, p_i)`
//! - the factual importance weight `π_e(a_i|x_i, p_i) / π_b(a_i|x_i)`
//! - the factual reward-model prediction `q̂(x_i, a_i, p_i)`
//!
//! [`LoggedBatch`] computes them on plain arrays, [`TensorBatch`] on
//! differentiable tensors.

use crate::argument::OpeInputs;
use crate::backend::{compute_dtype, NdArray};
use crate::validation::validate_inputs;
use crate::{Error, Result};
use candle_core::{DType, Tensor};
use ndarray::{s, Array1, Array3, ArrayD, Ix1, Ix3};

fn into_array1(array: ArrayD<f64>) -> Result<Array1<f64>> {
    array
        .into_dimensionality::<Ix1>()
        .map_err(|e| Error::Computation(e.to_string()))
}

fn into_array3(array: ArrayD<f64>) -> Result<Array3<f64>> {
    array
        .into_dimensionality::<Ix3>()
        .map_err(|e| Error::Computation(e.to_string()))
}

/// A validated batch on the plain numeric back-end
#[derive(Debug, Clone)]
pub struct LoggedBatch {
    pub action_dist: Array3<f64>,
    pub action: Array1<usize>,
    pub reward: Array1<f64>,
    pub pscore: Array1<f64>,
    pub position: Array1<usize>,
    pub estimated_rewards_by_reg_model: Array3<f64>,
}

impl LoggedBatch {
    /// Validate a call record and materialize it as typed arrays
    pub fn from_inputs(inputs: &OpeInputs<NdArray>) -> Result<Self> {
        let checked = validate_inputs(inputs)?;
        Ok(Self {
            action_dist: into_array3(checked.action_dist.to_f64())?,
            action: Array1::from(checked.actions),
            reward: into_array1(checked.reward.to_f64())?,
            pscore: into_array1(checked.pscore.to_f64())?,
            position: Array1::from(checked.positions),
            estimated_rewards_by_reg_model: into_array3(
                checked.estimated_rewards_by_reg_model.to_f64(),
            )?,
        })
    }

    pub fn n_rounds(&self) -> usize {
        self.action.len()
    }

    /// Reward model's value of the evaluation policy at the logged position
    pub fn direct_method_values(&self) -> Array1<f64> {
        Array1::from_iter((0..self.n_rounds()).map(|i| {
            let p = self.position[i];
            self.action_dist
                .slice(s![i, .., p])
                .dot(&self.estimated_rewards_by_reg_model.slice(s![i, .., p]))
        }))
    }

    /// Importance weight of the logged action
    pub fn importance_weights(&self) -> Array1<f64> {
        Array1::from_iter((0..self.n_rounds()).map(|i| {
            self.action_dist[[i, self.action[i], self.position[i]]] / self.pscore[i]
        }))
    }

    /// Reward model's prediction for the logged action
    pub fn factual_estimates(&self) -> Array1<f64> {
        Array1::from_iter((0..self.n_rounds()).map(|i| {
            self.estimated_rewards_by_reg_model[[i, self.action[i], self.position[i]]]
        }))
    }

    /// Observed reward minus the factual prediction
    pub fn residuals(&self) -> Array1<f64> {
        &self.reward - &self.factual_estimates()
    }
}

/// A validated batch on the differentiable back-end
///
/// Float inputs are cast to the compute dtype of `action_dist`; the casts
/// are part of the autodiff graph, so gradients reach the caller's tensors.
#[derive(Debug, Clone)]
pub struct TensorBatch {
    pub action_dist: Tensor,
    pub reward: Tensor,
    pub pscore: Tensor,
    pub estimated_rewards_by_reg_model: Tensor,
    /// Flat `action * len_list + position` index per round, (n_rounds, 1)
    factual_index: Tensor,
    /// Logged position per round, (n_rounds, 1)
    position_index: Tensor,
    n_rounds: usize,
    n_actions: usize,
    len_list: usize,
}

impl TensorBatch {
    /// Validate a call record and prepare gather indices
    pub fn from_inputs(inputs: &OpeInputs<Tensor>) -> Result<Self> {
        let checked = validate_inputs(inputs)?;
        let dtype = compute_dtype(checked.action_dist);
        let device = checked.action_dist.device();
        let n_rounds = checked.n_rounds;
        let len_list = checked.len_list;

        let factual: Vec<u32> = checked
            .actions
            .iter()
            .zip(&checked.positions)
            .map(|(&a, &p)| (a * len_list + p) as u32)
            .collect();
        let positions: Vec<u32> = checked.positions.iter().map(|&p| p as u32).collect();

        Ok(Self {
            action_dist: checked.action_dist.to_dtype(dtype)?.contiguous()?,
            reward: checked.reward.to_dtype(dtype)?,
            pscore: checked.pscore.to_dtype(dtype)?,
            estimated_rewards_by_reg_model: checked
                .estimated_rewards_by_reg_model
                .to_dtype(dtype)?
                .contiguous()?,
            factual_index: Tensor::from_vec(factual, (n_rounds, 1), device)?,
            position_index: Tensor::from_vec(positions, (n_rounds, 1), device)?,
            n_rounds,
            n_actions: checked.n_actions,
            len_list,
        })
    }

    pub fn n_rounds(&self) -> usize {
        self.n_rounds
    }

    /// Floating dtype all per-round tensors are computed in
    pub fn dtype(&self) -> DType {
        self.action_dist.dtype()
    }

    /// Pick `x[i, a_i, p_i]` for every round of a (n_rounds, n_actions, len_list) tensor
    fn gather_factual(&self, x: &Tensor) -> Result<Tensor> {
        let flat = x.reshape((self.n_rounds, self.n_actions * self.len_list))?;
        Ok(flat.gather(&self.factual_index, 1)?.squeeze(1)?)
    }

    /// Reward model's value of the evaluation policy at the logged position
    pub fn direct_method_values(&self) -> Result<Tensor> {
        let by_position = self
            .action_dist
            .mul(&self.estimated_rewards_by_reg_model)?
            .sum(1)?;
        Ok(by_position.gather(&self.position_index, 1)?.squeeze(1)?)
    }

    /// Importance weight of the logged action
    pub fn importance_weights(&self) -> Result<Tensor> {
        Ok(self.gather_factual(&self.action_dist)?.div(&self.pscore)?)
    }

    /// Reward model's prediction for the logged action
    pub fn factual_estimates(&self) -> Result<Tensor> {
        self.gather_factual(&self.estimated_rewards_by_reg_model)
    }

    /// Observed reward minus the factual prediction
    pub fn residuals(&self) -> Result<Tensor> {
        Ok(self.reward.sub(&self.factual_estimates()?)?)
    }
}
