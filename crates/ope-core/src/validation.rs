//! Input validation shared by every estimator and both back-ends
//!
//! Checks run in a fixed order and fail fast. The message of each failure
//! names the violated contract; callers match on these phrases, so they
//! must not change.

use crate::argument::{Argument, OpeInputs};
use crate::backend::{as_index, ArrayLike};
use crate::{Error, Result};
use tracing::debug;

/// Inputs that passed validation, borrowed from the call record
#[derive(Debug)]
pub struct CheckedInputs<'a, A> {
    pub action_dist: &'a A,
    pub reward: &'a A,
    pub pscore: &'a A,
    pub estimated_rewards_by_reg_model: &'a A,
    /// Logged actions as indices
    pub actions: Vec<usize>,
    /// Logged positions as indices (zeros when omitted)
    pub positions: Vec<usize>,
    pub n_rounds: usize,
    pub n_actions: usize,
    pub len_list: usize,
}

/// Resolve an argument slot to an array of the call's back-end
fn expect_array<'a, A: ArrayLike>(name: &str, slot: Option<&'a Argument<A>>) -> Result<&'a A> {
    slot.and_then(Argument::as_array)
        .ok_or_else(|| Error::invalid_input(format!("{name} must be {}", A::KIND)))
}

fn invalid<T>(message: &str) -> Result<T> {
    Err(Error::invalid_input(message))
}

/// Validate the call record and extract index vectors
///
/// Required-argument presence is checked separately by
/// [`OpeInputs::require`]; an omitted slot reaching this point fails the
/// type check.
pub fn validate_inputs<A: ArrayLike>(inputs: &OpeInputs<A>) -> Result<CheckedInputs<'_, A>> {
    let action_dist = expect_array("action_dist", Some(&inputs.action_dist))?;
    let dist_shape = action_dist.shape_vec();
    if dist_shape.len() != 3 {
        return invalid("action_dist must be 3-dimensional");
    }
    let (n_actions, len_list) = (dist_shape[1], dist_shape[2]);

    let action = expect_array("action", inputs.action.as_ref())?;
    let reward = expect_array("reward", inputs.reward.as_ref())?;
    let pscore = expect_array("pscore", inputs.pscore.as_ref())?;
    let estimated_rewards = expect_array(
        "estimated_rewards_by_reg_model",
        inputs.estimated_rewards_by_reg_model.as_ref(),
    )?;

    let action_values = action.to_f64_vec()?;
    if !action.is_integral() || action_values.iter().any(|&a| a < 0.0) {
        return invalid("action elements must be non-negative integers");
    }
    if action.ndim() != 1 {
        return invalid("action must be 1-dimensional");
    }
    if action_values.iter().any(|&a| a >= n_actions as f64) {
        return invalid("action elements must be smaller than the second dimension of action_dist");
    }

    if reward.ndim() != 1 {
        return invalid("reward must be 1-dimensional");
    }
    if action.leading_len() != reward.leading_len() {
        return invalid("action and reward must be the same size.");
    }

    if pscore.ndim() != 1 {
        return invalid("pscore must be 1-dimensional");
    }
    if pscore.leading_len() != action.leading_len() {
        return invalid("action, reward, and pscore must be the same size.");
    }
    if pscore.to_f64_vec()?.iter().any(|&p| !(p > 0.0)) {
        return invalid("pscore must be positive");
    }

    if estimated_rewards.shape_vec() != dist_shape {
        return invalid("estimated_rewards_by_reg_model.shape must be the same as action_dist.shape");
    }

    let n_rounds = action.leading_len();
    if dist_shape[0] != n_rounds {
        return invalid("action and action_dist must have the same number of rounds");
    }

    let positions = match inputs.position.as_ref() {
        None | Some(Argument::Null) => vec![0; n_rounds],
        Some(slot) => {
            let position = expect_array("position", Some(slot))?;
            if position.ndim() != 1 {
                return invalid("position must be 1-dimensional");
            }
            if position.leading_len() != n_rounds {
                return invalid("action and position must be the same size.");
            }
            let values = position.to_f64_vec()?;
            if !position.is_integral() || values.iter().any(|&p| p < 0.0) {
                return invalid("position elements must be non-negative integers");
            }
            if values.iter().any(|&p| p >= len_list as f64) {
                return invalid(
                    "position elements must be smaller than the third dimension of action_dist",
                );
            }
            values.into_iter().map(as_index).collect::<Result<Vec<_>>>()?
        }
    };

    if n_rounds == 0 {
        return Err(Error::empty_batch());
    }

    let actions = action_values
        .into_iter()
        .map(as_index)
        .collect::<Result<Vec<_>>>()?;

    debug!(
        backend = A::KIND,
        n_rounds, n_actions, len_list, "validated off-policy inputs"
    );

    Ok(CheckedInputs {
        action_dist,
        reward,
        pscore,
        estimated_rewards_by_reg_model: estimated_rewards,
        actions,
        positions,
        n_rounds,
        n_actions,
        len_list,
    })
}
