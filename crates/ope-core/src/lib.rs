//! Core types for off-policy evaluation
//!
//! This crate provides the pieces every off-policy estimator shares:
//!
//! - **Back-ends**: [`ArrayLike`] over plain numeric arrays ([`NdArray`])
//!   and differentiable tensors ([`candle_core::Tensor`])
//! - **Call contract**: [`OpeInputs`], a named-parameter record with
//!   explicit detection of omitted arguments
//! - **Validation**: [`validate_inputs`], run identically for both back-ends
//! - **Batches**: [`LoggedBatch`] and [`TensorBatch`], validated inputs with
//!   the per-round Direct Method values, importance weights and factual
//!   reward-model predictions
//!
//! # Example
//!
//! ```rust
//! use ndarray::{array, Array3};
//! use ope_core::{LoggedBatch, NdArray, OpeInputs};
//!
//! let inputs = OpeInputs::new(NdArray::from(Array3::<f64>::from_elem((2, 2, 1), 0.5)))
//!     .action(NdArray::from(array![0i64, 1]))
//!     .reward(NdArray::from(array![1.0, 0.0]))
//!     .pscore(NdArray::from(array![0.5, 0.5]))
//!     .estimated_rewards_by_reg_model(NdArray::from(Array3::<f64>::zeros((2, 2, 1))));
//!
//! let batch = LoggedBatch::from_inputs(&inputs).unwrap();
//! assert_eq!(batch.importance_weights().to_vec(), vec![1.0, 1.0]);
//! ```

pub mod argument;
pub mod backend;
pub mod batch;
pub mod error;
pub mod hyperparameter;
#[cfg(any(test, feature = "test-utils"))]
pub mod synthetic;
pub mod validation;

// Re-export core types
pub use argument::{Argument, OpeInputs, REQUIRED_ARGUMENTS};
pub use backend::{ArrayLike, NdArray};
pub use batch::{LoggedBatch, TensorBatch};
pub use error::{Error, ErrorKind, Result};
pub use hyperparameter::Hyperparameter;
pub use validation::{validate_inputs, CheckedInputs};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Argument, ArrayLike, Error, ErrorKind, Hyperparameter, LoggedBatch, NdArray, OpeInputs,
        Result, TensorBatch,
    };
}
