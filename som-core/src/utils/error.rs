#[cfg(test)]
#[path = "../../tests/unit/utils/error_test.rs"]
mod error_test;

use thiserror::Error;

/// Represents an error which can happen while building or training a map.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SomError {
    /// An argument is out of its valid domain: negative radius or distance, learning rate
    /// outside of [0, 1], empty input, etc.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Two vectors have different dimensions. This is a special kind of invalid argument.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// An operation is invoked before its prerequisite phase.
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// A feature value cannot be parsed as a number.
    #[error("cannot parse feature at index {index}: '{value}'")]
    NumericParse {
        /// Index of the feature inside the input record.
        index: usize,
        /// Raw value which failed to parse.
        value: String,
    },
}

/// A type alias for result type with `SomError`.
pub type SomResult<T> = Result<T, SomError>;

impl SomError {
    /// Creates `InvalidArgument` error.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates `IllegalState` error.
    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState(message.into())
    }

    /// Returns true if error is caused by an invalid argument (including dimension mismatch).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::DimensionMismatch { .. })
    }

    /// Returns true if error is caused by an operation invoked in a wrong phase.
    pub fn is_illegal_state(&self) -> bool {
        matches!(self, Self::IllegalState(_))
    }
}

/// Fails with `DimensionMismatch` when dimensions are different.
pub(crate) fn ensure_dimension(expected: usize, actual: usize) -> SomResult<()> {
    if expected == actual { Ok(()) } else { Err(SomError::DimensionMismatch { expected, actual }) }
}
