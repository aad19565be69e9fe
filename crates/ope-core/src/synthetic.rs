//! Synthetic bandit feedback for tests and benchmarks
//!
//! Generates logged data from a softmax behavior policy over random
//! logits, with Bernoulli rewards drawn from a sigmoid expected-reward
//! surface. Everything is seeded for reproducibility.

use crate::argument::OpeInputs;
use crate::backend::NdArray;
use ndarray::{Array1, Array2, Array3, Axis};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Bernoulli, Distribution, Normal, Uniform};

/// Random evaluation-policy distribution, a simplex per (round, position)
pub fn generate_action_dist<R: Rng + ?Sized>(
    n_rounds: usize,
    n_actions: usize,
    len_list: usize,
    rng: &mut R,
) -> Array3<f64> {
    let uniform = Uniform::new(0.0, 1.0);
    let mut dist = Array3::from_shape_fn((n_rounds, n_actions, len_list), |_| {
        uniform.sample(&mut *rng)
    });
    let totals = dist.sum_axis(Axis(1));
    for i in 0..n_rounds {
        for p in 0..len_list {
            let total = totals[[i, p]];
            for a in 0..n_actions {
                dist[[i, a, p]] /= total;
            }
        }
    }
    dist
}

fn softmax_row(logits: &[f64]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = logits.iter().map(|l| (l - max).exp()).collect();
    let total: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

fn sample_categorical<R: Rng + ?Sized>(probs: &[f64], rng: &mut R) -> usize {
    let u: f64 = rng.gen();
    let mut cumulative = 0.0;
    for (a, p) in probs.iter().enumerate() {
        cumulative += p;
        if u < cumulative {
            return a;
        }
    }
    probs.len() - 1
}

/// Logged data from a simulated single-position bandit
#[derive(Debug, Clone)]
pub struct SyntheticBanditFeedback {
    pub n_rounds: usize,
    pub n_actions: usize,
    pub action: Array1<usize>,
    /// Binary rewards in {0, 1}
    pub reward: Array1<f64>,
    /// Behavior policy probability of the logged action
    pub pscore: Array1<f64>,
    /// Expected reward of every action, in (0, 1)
    pub expected_reward: Array2<f64>,
}

impl SyntheticBanditFeedback {
    /// Simulate `n_rounds` logged decisions over `n_actions` actions
    pub fn generate(n_rounds: usize, n_actions: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let normal = Normal::<f64>::new(0.0, 1.0).expect("unit normal is valid");

        let expected_reward = Array2::from_shape_fn((n_rounds, n_actions), |_| {
            1.0 / (1.0 + (-normal.sample(&mut rng)).exp())
        });

        let mut action = Array1::zeros(n_rounds);
        let mut pscore = Array1::zeros(n_rounds);
        let mut reward = Array1::zeros(n_rounds);
        for i in 0..n_rounds {
            let logits: Vec<f64> = (0..n_actions).map(|_| normal.sample(&mut rng)).collect();
            let behavior = softmax_row(&logits);
            let a = sample_categorical(&behavior, &mut rng);
            action[i] = a;
            pscore[i] = behavior[a];
            let click = Bernoulli::new(expected_reward[[i, a]])
                .expect("sigmoid output is a probability")
                .sample(&mut rng);
            reward[i] = if click { 1.0 } else { 0.0 };
        }

        Self {
            n_rounds,
            n_actions,
            action,
            reward,
            pscore,
            expected_reward,
        }
    }

    /// Expected rewards as a (n_rounds, n_actions, 1) reward-model output
    pub fn expected_reward_3d(&self) -> Array3<f64> {
        self.expected_reward.clone().insert_axis(Axis(2))
    }

    /// Random evaluation policy over the same rounds, (n_rounds, n_actions, 1)
    pub fn random_action_dist(&self, seed: u64) -> Array3<f64> {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_action_dist(self.n_rounds, self.n_actions, 1, &mut rng)
    }

    /// Complete estimator inputs using the true expected reward as the reward model
    pub fn to_inputs(&self, action_dist: Array3<f64>) -> OpeInputs<NdArray> {
        OpeInputs::new(NdArray::from(action_dist))
            .action(NdArray::from(self.action.clone()))
            .reward(NdArray::from(self.reward.clone()))
            .pscore(NdArray::from(self.pscore.clone()))
            .estimated_rewards_by_reg_model(NdArray::from(self.expected_reward_3d()))
    }
}
