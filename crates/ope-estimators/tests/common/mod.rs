//! Shared utilities for integration tests

#![allow(dead_code)]

use candle_core::{Device, Tensor};
use ndarray::{array, Array1, Array2, Array3};
use ope_core::synthetic::{generate_action_dist, SyntheticBanditFeedback};
use ope_core::{Argument, NdArray, OpeInputs};
use ope_estimators::{
    DirectMethod, DoublyRobust, DoublyRobustWithShrinkage, Estimator, SelfNormalizedDoublyRobust,
    SwitchDoublyRobust,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const N_ROUNDS: usize = 5;
pub const N_ACTIONS: usize = 4;
pub const LEN_LIST: usize = 3;

/// Seeded evaluation-policy distribution, a simplex per (round, position)
pub fn action_dist(n_rounds: usize, n_actions: usize, len_list: usize, seed: u64) -> Array3<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    generate_action_dist(n_rounds, n_actions, len_list, &mut rng)
}

pub fn int(values: Array1<i64>) -> NdArray {
    NdArray::from(values)
}

pub fn float(values: Array1<f64>) -> NdArray {
    NdArray::from(values)
}

/// Well-formed 5 x 4 x 3 inputs, the base that malformed cases perturb
pub fn valid_inputs() -> OpeInputs<NdArray> {
    OpeInputs::new(NdArray::from(action_dist(N_ROUNDS, N_ACTIONS, LEN_LIST, 0)))
        .action(int(Array1::zeros(N_ROUNDS)))
        .reward(int(Array1::zeros(N_ROUNDS)))
        .pscore(float(Array1::ones(N_ROUNDS)))
        .position(int(array![0, 1, 2, 0, 1]))
        .estimated_rewards_by_reg_model(NdArray::from(Array3::<f64>::zeros((
            N_ROUNDS, N_ACTIONS, LEN_LIST,
        ))))
}

/// Malformed inputs and the message substring each must be rejected with
pub fn invalid_cases() -> Vec<(OpeInputs<NdArray>, &'static str)> {
    let text = || Argument::<NdArray>::text("4");
    vec![
        (valid_inputs().action(Argument::Null), "action must be ndarray"),
        (valid_inputs().reward(Argument::Null), "reward must be ndarray"),
        (valid_inputs().pscore(Argument::Null), "pscore must be ndarray"),
        (
            valid_inputs().estimated_rewards_by_reg_model(Argument::Null),
            "estimated_rewards_by_reg_model must be ndarray",
        ),
        (
            valid_inputs().action(float(Array1::zeros(N_ROUNDS))),
            "action elements must be non-negative integers",
        ),
        (
            valid_inputs().action(int(Array1::from_elem(N_ROUNDS, -1))),
            "action elements must be non-negative integers",
        ),
        (valid_inputs().action(text()), "action must be ndarray"),
        (
            valid_inputs().action(NdArray::from(Array2::<i64>::zeros((3, 2)))),
            "action must be 1-dimensional",
        ),
        (
            valid_inputs().action(int(Array1::from_elem(N_ROUNDS, 8))),
            "action elements must be smaller than the second dimension of action_dist",
        ),
        (valid_inputs().reward(text()), "reward must be ndarray"),
        (
            valid_inputs().reward(NdArray::from(Array2::<i64>::zeros((3, 2)))),
            "reward must be 1-dimensional",
        ),
        (
            valid_inputs().reward(int(Array1::zeros(4))),
            "action and reward must be the same size.",
        ),
        (valid_inputs().pscore(text()), "pscore must be ndarray"),
        (
            valid_inputs().pscore(NdArray::from(Array2::<f64>::ones((N_ROUNDS, 3)))),
            "pscore must be 1-dimensional",
        ),
        (
            valid_inputs().pscore(float(Array1::ones(4))),
            "action, reward, and pscore must be the same size.",
        ),
        (
            valid_inputs().pscore(int(Array1::from_iter(0..N_ROUNDS as i64))),
            "pscore must be positive",
        ),
        (
            valid_inputs().estimated_rewards_by_reg_model(NdArray::from(Array3::<f64>::zeros((
                N_ROUNDS, N_ACTIONS, 2,
            )))),
            "estimated_rewards_by_reg_model.shape must be the same as action_dist.shape",
        ),
        (
            valid_inputs().estimated_rewards_by_reg_model(text()),
            "estimated_rewards_by_reg_model must be ndarray",
        ),
    ]
}

/// Same values on the tensor back-end: integers become I64, floats F64
pub fn to_tensor(array: &NdArray) -> Tensor {
    let device = Device::Cpu;
    let tensor = match array {
        NdArray::Int(a) => {
            Tensor::from_vec(a.iter().copied().collect::<Vec<i64>>(), a.shape().to_vec(), &device)
        }
        NdArray::Float(a) => {
            Tensor::from_vec(a.iter().copied().collect::<Vec<f64>>(), a.shape().to_vec(), &device)
        }
    };
    tensor.unwrap()
}

fn convert(argument: &Argument<NdArray>) -> Argument<Tensor> {
    match argument {
        Argument::Array(a) => Argument::Array(to_tensor(a)),
        Argument::Text(t) => Argument::Text(t.clone()),
        Argument::Null => Argument::Null,
    }
}

/// Mirror a call record onto the tensor back-end
pub fn to_tensor_inputs(inputs: &OpeInputs<NdArray>) -> OpeInputs<Tensor> {
    OpeInputs {
        action_dist: convert(&inputs.action_dist),
        action: inputs.action.as_ref().map(convert),
        reward: inputs.reward.as_ref().map(convert),
        pscore: inputs.pscore.as_ref().map(convert),
        position: inputs.position.as_ref().map(convert),
        estimated_rewards_by_reg_model: inputs.estimated_rewards_by_reg_model.as_ref().map(convert),
    }
}

/// Synthetic logged data with a random evaluation policy and the true
/// expected reward as the reward model
pub fn synthetic_inputs(n_rounds: usize, n_actions: usize, seed: u64) -> OpeInputs<NdArray> {
    let feedback = SyntheticBanditFeedback::generate(n_rounds, n_actions, seed);
    let dist = feedback.random_action_dist(seed.wrapping_add(1));
    feedback.to_inputs(dist)
}

/// Remove every required argument, keeping `action_dist` and `position`
pub fn without_required<A: Clone>(inputs: &OpeInputs<A>) -> OpeInputs<A> {
    OpeInputs {
        action: None,
        reward: None,
        pscore: None,
        estimated_rewards_by_reg_model: None,
        ..inputs.clone()
    }
}

/// The estimator line-up exercised against every malformed input
pub fn dr_estimators() -> Vec<Estimator> {
    vec![
        DoublyRobust::new().into(),
        DoublyRobustWithShrinkage::new(0.0).unwrap().into(),
        SelfNormalizedDoublyRobust::new().into(),
        SwitchDoublyRobust::new(0.0).unwrap().into(),
    ]
}

pub fn all_estimators() -> Vec<Estimator> {
    let mut estimators: Vec<Estimator> = vec![DirectMethod::new().into()];
    estimators.extend(dr_estimators());
    estimators.push(DoublyRobustWithShrinkage::new(1e10).unwrap().into());
    estimators.push(SwitchDoublyRobust::new(1e10).unwrap().into());
    estimators
}

pub fn scalar(tensor: &Tensor) -> f64 {
    tensor
        .to_dtype(candle_core::DType::F64)
        .unwrap()
        .to_scalar::<f64>()
        .unwrap()
}
