//! Named-parameter call record shared by every estimator entry point
//!
//! Estimators take six named inputs. `action_dist` is supplied when the
//! record is built; the remaining slots start out omitted and are filled
//! with builder methods. Omitting a required slot is reported as
//! [`Error::MissingArguments`] before any validation runs.

use crate::backend::ArrayLike;
use crate::{Error, Result};

/// A caller-supplied value for one argument slot
#[derive(Debug, Clone, PartialEq)]
pub enum Argument<A> {
    /// An array of the call's back-end
    Array(A),
    /// A non-array value (e.g. a string where an array was expected)
    Text(String),
    /// An explicit "no value"
    Null,
}

impl<A> Argument<A> {
    /// Wrap a non-array value
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// The array, if this argument holds one
    pub fn as_array(&self) -> Option<&A> {
        match self {
            Self::Array(a) => Some(a),
            Self::Text(_) | Self::Null => None,
        }
    }

    /// Whether the caller passed an explicit null
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl<A: ArrayLike> From<A> for Argument<A> {
    fn from(array: A) -> Self {
        Self::Array(array)
    }
}

/// Required arguments, in the order they are reported when omitted
pub const REQUIRED_ARGUMENTS: [&str; 4] = [
    "reward",
    "action",
    "pscore",
    "estimated_rewards_by_reg_model",
];

/// Inputs to a single estimator call on back-end `A`
#[derive(Debug, Clone)]
pub struct OpeInputs<A> {
    /// Evaluation policy's action distribution, (n_rounds, n_actions, len_list)
    pub action_dist: Argument<A>,
    /// Actions taken by the logging policy, (n_rounds,)
    pub action: Option<Argument<A>>,
    /// Observed rewards, (n_rounds,)
    pub reward: Option<Argument<A>>,
    /// Logging policy propensities of the taken actions, (n_rounds,)
    pub pscore: Option<Argument<A>>,
    /// Logged positions, (n_rounds,); all zeros when omitted
    pub position: Option<Argument<A>>,
    /// Reward model predictions, same shape as `action_dist`
    pub estimated_rewards_by_reg_model: Option<Argument<A>>,
}

impl<A> OpeInputs<A> {
    /// Start a call record for the given evaluation-policy distribution
    pub fn new(action_dist: impl Into<Argument<A>>) -> Self {
        Self {
            action_dist: action_dist.into(),
            action: None,
            reward: None,
            pscore: None,
            position: None,
            estimated_rewards_by_reg_model: None,
        }
    }

    pub fn action(mut self, action: impl Into<Argument<A>>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn reward(mut self, reward: impl Into<Argument<A>>) -> Self {
        self.reward = Some(reward.into());
        self
    }

    pub fn pscore(mut self, pscore: impl Into<Argument<A>>) -> Self {
        self.pscore = Some(pscore.into());
        self
    }

    pub fn position(mut self, position: impl Into<Argument<A>>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn estimated_rewards_by_reg_model(
        mut self,
        estimated_rewards: impl Into<Argument<A>>,
    ) -> Self {
        self.estimated_rewards_by_reg_model = Some(estimated_rewards.into());
        self
    }

    /// Names of omitted required arguments, in reporting order
    pub fn missing_arguments(&self) -> Vec<&'static str> {
        let slots = [
            self.reward.is_some(),
            self.action.is_some(),
            self.pscore.is_some(),
            self.estimated_rewards_by_reg_model.is_some(),
        ];
        REQUIRED_ARGUMENTS
            .iter()
            .zip(slots)
            .filter(|(_, present)| !present)
            .map(|(name, _)| *name)
            .collect()
    }

    /// Fail with [`Error::MissingArguments`] if any required slot is omitted
    pub fn require(&self, method: &'static str) -> Result<()> {
        let names = self.missing_arguments();
        if names.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingArguments { method, names })
        }
    }
}
