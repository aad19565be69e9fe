//! Scalar hyperparameter values and their validation

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar hyperparameter as supplied by a caller or a config document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Hyperparameter {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Hyperparameter {
    /// Validate as a non-negative, non-NaN number and return it as `f64`
    ///
    /// `name` is the hyperparameter's role, e.g. "switching hyperparameter".
    pub fn non_negative(&self, name: &str) -> Result<f64> {
        let value = match self {
            Self::Int(v) => *v as f64,
            Self::Float(v) => *v,
            Self::Text(_) => {
                return Err(Error::InvalidParameter(format!(
                    "{name} must be float or integer"
                )))
            }
        };
        if value.is_nan() {
            return Err(Error::InvalidParameter(format!("{name} must not be nan")));
        }
        if value < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "{name} must be larger than or equal to zero"
            )));
        }
        Ok(value)
    }
}

impl From<f64> for Hyperparameter {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Hyperparameter {
    fn from(value: f32) -> Self {
        Self::Float(value as f64)
    }
}

impl From<i64> for Hyperparameter {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Hyperparameter {
    fn from(value: i32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<u32> for Hyperparameter {
    fn from(value: u32) -> Self {
        Self::Int(value as i64)
    }
}

impl From<&str> for Hyperparameter {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Hyperparameter {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for Hyperparameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: &str = "switching hyperparameter";

    #[test]
    fn test_valid_values() {
        assert_eq!(Hyperparameter::from(3.0).non_negative(NAME).unwrap(), 3.0);
        assert_eq!(Hyperparameter::from(2).non_negative(NAME).unwrap(), 2.0);
        assert_eq!(Hyperparameter::from(0.0).non_negative(NAME).unwrap(), 0.0);
        assert!(Hyperparameter::from(f64::INFINITY)
            .non_negative(NAME)
            .unwrap()
            .is_infinite());
    }

    #[test]
    fn test_invalid_values() {
        let cases = [
            (Hyperparameter::from("a"), "switching hyperparameter must be float or integer"),
            (
                Hyperparameter::from(-1.0),
                "switching hyperparameter must be larger than or equal to zero",
            ),
            (Hyperparameter::from(-1), "switching hyperparameter must be larger than or equal to zero"),
            (Hyperparameter::from(f64::NAN), "switching hyperparameter must not be nan"),
        ];
        for (value, message) in cases {
            let err = value.non_negative(NAME).unwrap_err();
            assert!(matches!(err, Error::InvalidParameter(_)));
            assert!(err.to_string().contains(message), "{err}");
        }
    }

    #[test]
    fn test_deserialize_untagged() {
        let v: Hyperparameter = serde_json::from_str("2").unwrap();
        assert_eq!(v, Hyperparameter::Int(2));
        let v: Hyperparameter = serde_json::from_str("0.5").unwrap();
        assert_eq!(v, Hyperparameter::Float(0.5));
        let v: Hyperparameter = serde_json::from_str("\"a\"").unwrap();
        assert_eq!(v, Hyperparameter::Text("a".to_string()));
    }
}
