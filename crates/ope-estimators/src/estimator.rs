//! Closed set of estimators selected at construction time
//!
//! [`Estimator`] wraps every variant behind one value so callers can pick
//! an estimator from configuration and run it without generics.
//! [`EstimatorConfig`] is its serializable description:
//!
//! ```json
//! {"estimator": "switch-dr", "tau": 3.0}
//! {"estimator": "dr-os", "lambda": 10}
//! {"estimator": "sndr"}
//! ```

use crate::{
    DirectMethod, DoublyRobust, DoublyRobustWithShrinkage, PolicyValueEstimator,
    SelfNormalizedDoublyRobust, SwitchDoublyRobust,
};
use candle_core::Tensor;
use ndarray::Array1;
use ope_core::{Hyperparameter, LoggedBatch, OpeInputs, Result, TensorBatch};
use serde::{Deserialize, Serialize};
use tracing::debug;

fn default_tau() -> Hyperparameter {
    Hyperparameter::Float(f64::INFINITY)
}

fn default_lambda() -> Hyperparameter {
    Hyperparameter::Float(0.0)
}

/// Serializable estimator description, tagged by estimator name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "estimator", rename_all = "kebab-case")]
pub enum EstimatorConfig {
    Dm,
    Dr,
    Sndr,
    SwitchDr {
        #[serde(default = "default_tau")]
        tau: Hyperparameter,
    },
    DrOs {
        #[serde(default = "default_lambda", alias = "lambda_")]
        lambda: Hyperparameter,
    },
}

/// Any estimator of the family
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Estimator {
    Dm(DirectMethod),
    Dr(DoublyRobust),
    Sndr(SelfNormalizedDoublyRobust),
    SwitchDr(SwitchDoublyRobust),
    DrOs(DoublyRobustWithShrinkage),
}

impl Estimator {
    /// Build a validated estimator from its description
    pub fn from_config(config: &EstimatorConfig) -> Result<Self> {
        let estimator = match config {
            EstimatorConfig::Dm => Self::Dm(DirectMethod),
            EstimatorConfig::Dr => Self::Dr(DoublyRobust),
            EstimatorConfig::Sndr => Self::Sndr(SelfNormalizedDoublyRobust),
            EstimatorConfig::SwitchDr { tau } => {
                Self::SwitchDr(SwitchDoublyRobust::new(tau.clone())?)
            }
            EstimatorConfig::DrOs { lambda } => {
                Self::DrOs(DoublyRobustWithShrinkage::new(lambda.clone())?)
            }
        };
        debug!(estimator = estimator.estimator_name(), "built estimator from config");
        Ok(estimator)
    }

    /// Parse a JSON description and build the estimator
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EstimatorConfig = serde_json::from_str(json)?;
        Self::from_config(&config)
    }

    /// Description that rebuilds this estimator
    pub fn config(&self) -> EstimatorConfig {
        match self {
            Self::Dm(_) => EstimatorConfig::Dm,
            Self::Dr(_) => EstimatorConfig::Dr,
            Self::Sndr(_) => EstimatorConfig::Sndr,
            Self::SwitchDr(e) => EstimatorConfig::SwitchDr {
                tau: Hyperparameter::Float(e.tau()),
            },
            Self::DrOs(e) => EstimatorConfig::DrOs {
                lambda: Hyperparameter::Float(e.lambda()),
            },
        }
    }

    fn inner(&self) -> &dyn EstimatorObject {
        match self {
            Self::Dm(e) => e,
            Self::Dr(e) => e,
            Self::Sndr(e) => e,
            Self::SwitchDr(e) => e,
            Self::DrOs(e) => e,
        }
    }
}

/// Object-safe view of [`PolicyValueEstimator`] used for delegation
trait EstimatorObject {
    fn name(&self) -> &'static str;
    fn round_rewards(&self, batch: &LoggedBatch) -> Array1<f64>;
    fn round_rewards_tensor(&self, batch: &TensorBatch) -> Result<Tensor>;
    fn policy_value_tensor(&self, inputs: &OpeInputs<Tensor>) -> Result<Tensor>;
}

impl<E: PolicyValueEstimator> EstimatorObject for E {
    fn name(&self) -> &'static str {
        self.estimator_name()
    }

    fn round_rewards(&self, batch: &LoggedBatch) -> Array1<f64> {
        self.estimate_round_rewards(batch)
    }

    fn round_rewards_tensor(&self, batch: &TensorBatch) -> Result<Tensor> {
        self.estimate_round_rewards_tensor(batch)
    }

    fn policy_value_tensor(&self, inputs: &OpeInputs<Tensor>) -> Result<Tensor> {
        self.estimate_policy_value_tensor(inputs)
    }
}

impl PolicyValueEstimator for Estimator {
    fn estimator_name(&self) -> &'static str {
        self.inner().name()
    }

    fn estimate_round_rewards(&self, batch: &LoggedBatch) -> Array1<f64> {
        self.inner().round_rewards(batch)
    }

    fn estimate_round_rewards_tensor(&self, batch: &TensorBatch) -> Result<Tensor> {
        self.inner().round_rewards_tensor(batch)
    }

    // Variants may override the tensor entry point (Switch-DR does).
    fn estimate_policy_value_tensor(&self, inputs: &OpeInputs<Tensor>) -> Result<Tensor> {
        self.inner().policy_value_tensor(inputs)
    }
}

impl From<DirectMethod> for Estimator {
    fn from(e: DirectMethod) -> Self {
        Self::Dm(e)
    }
}

impl From<DoublyRobust> for Estimator {
    fn from(e: DoublyRobust) -> Self {
        Self::Dr(e)
    }
}

impl From<SelfNormalizedDoublyRobust> for Estimator {
    fn from(e: SelfNormalizedDoublyRobust) -> Self {
        Self::Sndr(e)
    }
}

impl From<SwitchDoublyRobust> for Estimator {
    fn from(e: SwitchDoublyRobust) -> Self {
        Self::SwitchDr(e)
    }
}

impl From<DoublyRobustWithShrinkage> for Estimator {
    fn from(e: DoublyRobustWithShrinkage) -> Self {
        Self::DrOs(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ope_core::ErrorKind;

    #[test]
    fn test_names_match_config_tags() {
        let configs = [
            (r#"{"estimator": "dm"}"#, "dm"),
            (r#"{"estimator": "dr"}"#, "dr"),
            (r#"{"estimator": "sndr"}"#, "sndr"),
            (r#"{"estimator": "switch-dr", "tau": 3.0}"#, "switch-dr"),
            (r#"{"estimator": "dr-os", "lambda": 10}"#, "dr-os"),
        ];
        for (json, name) in configs {
            let estimator = Estimator::from_json(json).unwrap();
            assert_eq!(estimator.estimator_name(), name);
        }
    }

    #[test]
    fn test_config_defaults_and_alias() {
        match Estimator::from_json(r#"{"estimator": "switch-dr"}"#).unwrap() {
            Estimator::SwitchDr(e) => assert!(e.tau().is_infinite()),
            other => panic!("unexpected {other:?}"),
        }
        match Estimator::from_json(r#"{"estimator": "dr-os", "lambda_": 2}"#).unwrap() {
            Estimator::DrOs(e) => assert_eq!(e.lambda(), 2.0),
            other => panic!("unexpected {other:?}"),
        }
        match Estimator::from_json(r#"{"estimator": "dr-os"}"#).unwrap() {
            Estimator::DrOs(e) => assert_eq!(e.lambda(), 0.0),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_invalid_configs() {
        let err = Estimator::from_json(r#"{"estimator": "switch-dr", "tau": -1}"#).unwrap_err();
        assert!(err
            .to_string()
            .contains("switching hyperparameter must be larger than or equal to zero"));

        let err = Estimator::from_json(r#"{"estimator": "dr-os", "lambda": "a"}"#).unwrap_err();
        assert!(err
            .to_string()
            .contains("shrinkage hyperparameter must be float or integer"));

        let err = Estimator::from_json(r#"{"estimator": "ipw"}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_config_rebuilds_estimator() {
        let original = Estimator::from(SwitchDoublyRobust::new(2.5).unwrap());
        let rebuilt = Estimator::from_config(&original.config()).unwrap();
        assert_eq!(original, rebuilt);

        let json = serde_json::to_string(&EstimatorConfig::DrOs {
            lambda: Hyperparameter::Float(1.5),
        })
        .unwrap();
        assert_eq!(json, r#"{"estimator":"dr-os","lambda":1.5}"#);
    }
}
