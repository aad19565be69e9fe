//! Off-policy evaluation for contextual bandit decision systems
//!
//! This crate re-exports the workspace crates:
//!
//! - [`core`]: call contract, input validation, numeric back-ends
//! - [`confidence`]: bootstrap and asymptotic confidence intervals
//! - [`estimators`]: DM, DR, SNDR, Switch-DR and DRos
//!
//! # Example
//!
//! ```rust
//! use ndarray::{array, Array3};
//! use ope_stats::prelude::*;
//!
//! let inputs = OpeInputs::new(NdArray::from(Array3::<f64>::from_elem((3, 2, 1), 0.5)))
//!     .action(NdArray::from(array![0i64, 1, 0]))
//!     .reward(NdArray::from(array![1.0, 0.0, 1.0]))
//!     .pscore(NdArray::from(array![0.5, 0.5, 0.5]))
//!     .estimated_rewards_by_reg_model(NdArray::from(Array3::<f64>::from_elem((3, 2, 1), 0.5)));
//!
//! let estimator = Estimator::from_json(r#"{"estimator": "dr-os", "lambda": 10}"#).unwrap();
//! let value = estimator.estimate_policy_value(&inputs).unwrap();
//! let ci = estimator
//!     .estimate_interval(&inputs, &AsymptoticCI::normal(0.95).unwrap())
//!     .unwrap();
//! assert_eq!(ci.estimate, value);
//! ```

pub use ope_confidence as confidence;
pub use ope_core as core;
pub use ope_estimators as estimators;

pub use ope_core::{Error, ErrorKind, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use ope_confidence::{
        AsymptoticCI, BasicBootstrap, Bootstrap, BootstrapConfig, ConfidenceInterval,
        ConfidenceLevel, IntervalEstimator, PercentileBootstrap,
    };
    pub use ope_core::prelude::*;
    pub use ope_estimators::{
        DirectMethod, DoublyRobust, DoublyRobustWithShrinkage, Estimator, EstimatorConfig,
        PolicyValueEstimator, SelfNormalizedDoublyRobust, SwitchDoublyRobust,
    };
}
