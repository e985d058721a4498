//! Numerical support for the estimators.

pub mod rcond;

use nalgebra::RealField;

use crate::error::{EstimateError, Result};
use crate::matrix::Matrix;

/// Inverse of a symmetric positive definite matrix.
///
/// A 1x1 matrix is inverted as the reciprocal of its single entry, larger matrices by Cholesky
/// factorisation. Fails if the matrix is not positive definite, which includes a zero or NaN
/// scalar.
pub fn inverse_spd<N: RealField>(m: Matrix<N>) -> Result<Matrix<N>> {
    if !m.is_square() {
        return Err(EstimateError::Dimension {
            op: "inverse",
            left: (m.nrows(), m.ncols()),
            right: (m.ncols(), m.nrows()),
        });
    }
    match m.nrows() {
        0 => Err(EstimateError::Shape("empty matrix")),
        1 => {
            let s = m[(0, 0)];
            // IEC 559 NaN values are never true
            if s > N::zero() {
                Ok(Matrix::from_element(1, 1, N::one() / s))
            } else {
                Err(EstimateError::SingularMatrix("scalar not positive"))
            }
        }
        _ => m
            .cholesky()
            .map(|c| c.inverse())
            .ok_or(EstimateError::SingularMatrix("not PD")),
    }
}
