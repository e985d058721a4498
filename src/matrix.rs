//! Dimension checked matrix algebra.
//!
//! Matrices are dynamically sized [`DMatrix`] values. nalgebra panics on incompatible operands,
//! these functions check shapes first and report a [`EstimateError`] instead, so a malformed
//! model surfaces as an `Err` at the estimator's caller.
//!
//! No operation accepts an empty matrix.

use na::{DMatrix, RealField};
use nalgebra as na;
use num_traits::ToPrimitive;

use crate::error::{EstimateError, Result};

/// A rectangular matrix of reals.
pub type Matrix<N> = DMatrix<N>;

fn shape<N: RealField>(m: &Matrix<N>) -> (usize, usize) {
    (m.nrows(), m.ncols())
}

fn check_not_empty<N: RealField>(m: &Matrix<N>) -> Result<()> {
    if m.nrows() == 0 || m.ncols() == 0 {
        Err(EstimateError::Shape("empty matrix"))
    } else {
        Ok(())
    }
}

fn check_same_shape<N: RealField>(op: &'static str, a: &Matrix<N>, b: &Matrix<N>) -> Result<()> {
    if shape(a) != shape(b) {
        return Err(EstimateError::Dimension {
            op,
            left: shape(a),
            right: shape(b),
        });
    }
    Ok(())
}

/// Builds a matrix from rows of numeric cells.
///
/// Each cell is converted to a real. Unconvertible and NaN cells are rejected rather than
/// propagated, as are empty and ragged rows.
///
/// ```
/// use vehicle_estimate::matrix::from_rows;
/// let m = from_rows::<f64, _, _>(&[[1, 2], [3, 4]]).unwrap();
/// assert_eq!(m[(1, 0)], 3.);
/// ```
pub fn from_rows<N, T, R>(rows: &[R]) -> Result<Matrix<N>>
where
    N: RealField,
    T: ToPrimitive,
    R: AsRef<[T]>,
{
    let nrows = rows.len();
    if nrows == 0 {
        return Err(EstimateError::Shape("no rows"));
    }
    let ncols = rows[0].as_ref().len();
    if ncols == 0 {
        return Err(EstimateError::Shape("empty row"));
    }

    let mut values = Vec::with_capacity(nrows * ncols);
    for row in rows {
        let row = row.as_ref();
        if row.len() != ncols {
            return Err(EstimateError::Shape("ragged rows"));
        }
        for cell in row {
            let v = cell.to_f64().ok_or(EstimateError::Shape("entry not numeric"))?;
            if v.is_nan() {
                return Err(EstimateError::Shape("entry is NaN"));
            }
            values.push(na::convert::<f64, N>(v));
        }
    }

    Ok(Matrix::from_row_slice(nrows, ncols, &values))
}

/// A column matrix.
pub fn column<N: RealField>(values: &[N]) -> Result<Matrix<N>> {
    if values.is_empty() {
        return Err(EstimateError::Shape("empty column"));
    }
    Ok(Matrix::from_column_slice(values.len(), 1, values))
}

/// The `n`×`n` identity.
pub fn identity<N: RealField>(n: usize) -> Matrix<N> {
    Matrix::identity(n, n)
}

/// Matrix product `a.b`.
pub fn multiply<N: RealField>(a: &Matrix<N>, b: &Matrix<N>) -> Result<Matrix<N>> {
    check_not_empty(a)?;
    check_not_empty(b)?;
    if a.ncols() != b.nrows() {
        return Err(EstimateError::Dimension {
            op: "multiply",
            left: shape(a),
            right: shape(b),
        });
    }
    Ok(a * b)
}

/// Element-wise sum of one or more matrices, all shaped like the first.
pub fn sum<N: RealField>(operands: &[&Matrix<N>]) -> Result<Matrix<N>> {
    let (first, rest) = operands
        .split_first()
        .ok_or(EstimateError::Shape("sum of no operands"))?;
    check_not_empty(first)?;

    let mut result = (*first).clone();
    for m in rest {
        check_same_shape("sum", first, m)?;
        result += *m;
    }
    Ok(result)
}

/// Element-wise difference `a - b`.
pub fn subtract<N: RealField>(a: &Matrix<N>, b: &Matrix<N>) -> Result<Matrix<N>> {
    check_not_empty(a)?;
    check_same_shape("subtract", a, b)?;
    Ok(a - b)
}

/// Transpose of a (possibly non square) matrix.
pub fn transpose<N: RealField>(a: &Matrix<N>) -> Result<Matrix<N>> {
    check_not_empty(a)?;
    Ok(a.transpose())
}

/// Computes the quadratic form `lhs.mid.lhs'`.
///
/// `mid` must be square with the dimension of `lhs`'s columns. The result is symmetric when
/// `mid` is.
pub fn quadform<N: RealField>(lhs: &Matrix<N>, mid: &Matrix<N>) -> Result<Matrix<N>> {
    multiply(&multiply(lhs, mid)?, &transpose(lhs)?)
}

/// Checks `m` is square and symmetric within an absolute tolerance.
pub fn is_symmetric<N: RealField>(m: &Matrix<N>, tolerance: N) -> bool {
    if !m.is_square() {
        return false;
    }
    for i in 0..m.nrows() {
        for j in 0..i {
            let diff = m[(i, j)] - m[(j, i)];
            // NaN fails
            if !(diff.abs() < tolerance) {
                return false;
            }
        }
    }
    true
}
