//! Error types for off-policy evaluation
//!
//! Provides a unified error type for all ope-stats crates.

use thiserror::Error;

/// Core error type for off-policy evaluation
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid input data rejected by the input validator
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid hyperparameter or configuration value
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Insufficient data for the requested operation
    #[error("Insufficient data: expected at least {expected} rounds, got {actual}")]
    InsufficientData { expected: usize, actual: usize },

    /// Required call arguments were omitted
    #[error("{}", missing_arguments_message(.method, .names))]
    MissingArguments {
        method: &'static str,
        names: Vec<&'static str>,
    },

    /// Operation not offered by this estimator
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Numerical computation error
    #[error("Computation error: {0}")]
    Computation(String),

    /// Error raised by the tensor back-end
    #[error("Tensor error: {0}")]
    Tensor(#[from] candle_core::Error),

    /// Malformed configuration document
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of errors, as seen by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Inputs or hyperparameters violate the call contract
    InvalidInput,
    /// Required arguments were not supplied
    MissingArgument,
    /// The operation is not offered for this estimator/back-end
    Unsupported,
    /// Numerical or back-end failure
    Computation,
}

impl Error {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput(_)
            | Self::InvalidParameter(_)
            | Self::InsufficientData { .. }
            | Self::Config(_) => ErrorKind::InvalidInput,
            Self::MissingArguments { .. } => ErrorKind::MissingArgument,
            Self::NotImplemented(_) => ErrorKind::Unsupported,
            Self::Computation(_) | Self::Tensor(_) => ErrorKind::Computation,
        }
    }

    /// Create an error for an empty batch
    pub fn empty_batch() -> Self {
        Self::InsufficientData {
            expected: 1,
            actual: 0,
        }
    }

    /// Create an invalid-input error from a contract message
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

/// Render a missing-argument message the way callers of a keyword API expect:
/// `f() missing 2 required positional arguments: 'a' and 'b'`
fn missing_arguments_message(method: &str, names: &[&'static str]) -> String {
    let quoted: Vec<String> = names.iter().map(|name| format!("'{name}'")).collect();
    let listed = match quoted.as_slice() {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    };
    let noun = if names.len() == 1 { "argument" } else { "arguments" };
    format!(
        "{method}() missing {} required positional {noun}: {listed}",
        names.len()
    )
}
