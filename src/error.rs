//! Estimation errors.
//!
//! Every fallible operation of the crate returns [`Result`]. Errors are raised synchronously and
//! propagate to the caller; nothing is recovered internally.

use thiserror::Error;

/// Errors raised by the matrix layer, the estimators and the vehicle models.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimateError {
    /// An argument is not a well formed, non empty, rectangular numeric matrix.
    #[error("malformed matrix: {0}")]
    Shape(&'static str),
    /// Operand shapes are incompatible for the requested operation.
    #[error("{op}: incompatible dimensions {left:?} and {right:?}")]
    Dimension {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    /// A matrix that must be inverted is singular or not positive definite.
    #[error("singular matrix: {0}")]
    SingularMatrix(&'static str),
    /// A covariance is not symmetric positive semi-definite.
    #[error("{0} not PSD")]
    NotPositiveSemiDefinite(&'static str),
    /// A scalar argument is outside its domain.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
}

pub type Result<T> = std::result::Result<T, EstimateError>;
