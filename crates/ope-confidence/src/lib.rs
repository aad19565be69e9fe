//! Confidence intervals for off-policy value estimates
//!
//! Every off-policy estimator reduces a logged batch to a vector of
//! per-round estimates whose mean is the policy value. This crate turns
//! that vector into an interval:
//!
//! - **Bootstrap intervals**: percentile and basic methods over resample
//!   means, optionally parallel (`parallel` feature)
//! - **Asymptotic intervals**: normal or Student-t approximation of the mean
//!
//! # Example
//!
//! ```rust
//! use ope_confidence::{Bootstrap, IntervalEstimator, PercentileBootstrap};
//!
//! let per_round = vec![0.1, 0.4, 0.35, 0.8, 0.2, 0.6];
//! let bootstrap = Bootstrap::new(PercentileBootstrap)
//!     .with_resamples(2000)
//!     .with_confidence_level(0.95)
//!     .with_seed(12345);
//!
//! let ci = bootstrap.interval(&per_round).unwrap();
//! assert!(ci.lower <= ci.estimate && ci.estimate <= ci.upper);
//! println!("{}", ci);
//! ```

mod asymptotic;
mod bootstrap;
mod bootstrap_methods;
mod traits;
mod types;

// Re-exports
pub use asymptotic::AsymptoticCI;
pub use bootstrap::{Bootstrap, BootstrapConfig, BootstrapMethod, DEFAULT_RESAMPLES};
pub use bootstrap_methods::{BasicBootstrap, PercentileBootstrap};
pub use traits::IntervalEstimator;
pub use types::{ConfidenceInterval, ConfidenceLevel};
