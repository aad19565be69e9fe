//! Off-policy estimators of policy value
//!
//! This crate implements the Direct Method and the doubly robust family:
//!
//! - [`DirectMethod`] (`"dm"`): reward model only
//! - [`DoublyRobust`] (`"dr"`): DM plus importance-weighted residual
//! - [`SelfNormalizedDoublyRobust`] (`"sndr"`): weights divided by their mean
//! - [`SwitchDoublyRobust`] (`"switch-dr"`): DR only where the weight is at most `tau`
//! - [`DoublyRobustWithShrinkage`] (`"dr-os"`): weights shrunk by `lambda`
//!
//! Every estimator implements [`PolicyValueEstimator`], which validates the
//! inputs, reduces the per-round estimates to a policy value, builds an
//! interval through an [`ope_confidence::IntervalEstimator`], and (except
//! for Switch-DR) evaluates on differentiable `candle` tensors.
//!
//! # Example
//!
//! ```rust
//! use ndarray::{array, Array3};
//! use ope_confidence::{Bootstrap, PercentileBootstrap};
//! use ope_core::{NdArray, OpeInputs};
//! use ope_estimators::{DoublyRobust, PolicyValueEstimator};
//!
//! let inputs = OpeInputs::new(NdArray::from(Array3::<f64>::from_elem((4, 2, 1), 0.5)))
//!     .action(NdArray::from(array![0i64, 1, 1, 0]))
//!     .reward(NdArray::from(array![1.0, 0.0, 1.0, 1.0]))
//!     .pscore(NdArray::from(array![0.5, 0.5, 0.5, 0.5]))
//!     .estimated_rewards_by_reg_model(NdArray::from(Array3::<f64>::from_elem((4, 2, 1), 0.6)));
//!
//! let dr = DoublyRobust::new();
//! let value = dr.estimate_policy_value(&inputs).unwrap();
//!
//! let bootstrap = Bootstrap::new(PercentileBootstrap).with_resamples(1000).with_seed(12345);
//! let ci = dr.estimate_interval(&inputs, &bootstrap).unwrap();
//! assert_eq!(ci.estimate, value);
//! ```

mod direct_method;
mod doubly_robust;
mod estimator;
mod self_normalized;
mod shrinkage;
mod switch;
mod traits;

pub use direct_method::DirectMethod;
pub use doubly_robust::DoublyRobust;
pub use estimator::{Estimator, EstimatorConfig};
pub use self_normalized::SelfNormalizedDoublyRobust;
pub use shrinkage::DoublyRobustWithShrinkage;
pub use switch::SwitchDoublyRobust;
pub use traits::PolicyValueEstimator;
