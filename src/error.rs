//! Error types shared by projections and regularisers.
//!
//! Parameter problems are reported when a descriptor is built, so a
//! misconfigured solver fails before its first iteration. Shape problems
//! that can only be seen once an input arrives are reported by the
//! operation itself.

use thiserror::Error;

/// Errors raised while building or applying a projection or regulariser.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A radius, size, coefficient, weight, step or grouping is not valid.
    #[error("Invalid parameter: {reason}")]
    InvalidParameter {
        /// Description of the offending parameter
        reason: String,
    },

    /// An input does not match the shape the descriptor was built for.
    #[error("Shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        /// Expected shape
        expected: String,
        /// Actual shape
        actual: String,
    },
}

impl Error {
    /// Create an InvalidParameter error with a custom reason.
    pub fn invalid_parameter<S: Into<String>>(reason: S) -> Self {
        Self::InvalidParameter {
            reason: reason.into(),
        }
    }

    /// Create a ShapeMismatch error.
    pub fn shape_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::ShapeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Fails unless `value` is finite and strictly positive.
pub(crate) fn check_positive<A: ndarray::NdFloat>(name: &str, value: A) -> Result<A> {
    if value.is_finite() && value > A::zero() {
        Ok(value)
    } else {
        Err(Error::invalid_parameter(format!(
            "{} must be finite and positive, got {}",
            name, value
        )))
    }
}

/// Fails unless the two lengths agree.
pub(crate) fn check_len(what: &str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::shape_mismatch(
            format!("{} of length {}", what, expected),
            format!("length {}", actual),
        ))
    }
}
