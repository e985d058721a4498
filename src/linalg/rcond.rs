use nalgebra::RealField;

use crate::matrix::Matrix;

/**
 * Numerical comparison of reciprocal condition numbers
 *  Required for checking covariances supplied to the estimators
 */

/* Estimate the reciprocal condition number of a symmetric matrix from its diagonal.
 *
 * The Condition Number is defined from a matrix norm.
 *  Choose max element of the diagonal as the norm of the original matrix.
 *  Assume this norm for inverse matrix is min element of the diagonal.
 *  Therefore rcond = min/max
 *
 * Note:
 *  Defined to be 0 for semi-definite and 0 for an empty matrix
 *  Defined to be 0 for max and min infinite
 *  Defined to be <0 for negative matrix (diagonal element < 0)
 *  Defined to be <0 with any NaN element
 *
 *  By definition rcond <= 1 as min<=max
 */
pub fn rcond_symetric<N: RealField>(sm: &Matrix<N>) -> N {
    // Special case an empty matrix
    let n = sm.nrows().min(sm.ncols());
    if n == 0 {
        return N::zero();
    }

    let mut mind = sm[(0, 0)];
    let mut maxd = mind;

    for i in 0..n {
        let d = sm[(i, i)];
        if d != d {
            // NaN
            mind = -N::one();
            break;
        }
        if d < mind {
            mind = d;
        }
        if d > maxd {
            maxd = d;
        }
    }

    rcond_min_max(mind, maxd)
}

fn rcond_min_max<N: RealField>(mind: N, maxd: N) -> N {
    if mind < N::zero() {
        // matrix is negative
        mind // mind < 0 but does not represent a rcond
    } else {
        let rcond = mind / maxd; // rcond from min/max norm
        if rcond != rcond {
            // NaN, singular due to (mind == maxd) == (zero or infinity)
            N::zero()
        } else {
            rcond
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagonal_ratio() {
        let m = Matrix::from_row_slice(2, 2, &[4., 1., 1., 2.]);
        assert_eq!(rcond_symetric(&m), 0.5);
    }

    #[test]
    fn zero_and_negative() {
        assert_eq!(rcond_symetric(&Matrix::<f64>::zeros(2, 2)), 0.);
        let negative = Matrix::from_row_slice(2, 2, &[1., 0., 0., -3.]);
        assert!(rcond_symetric(&negative) < 0.);
        let nan = Matrix::from_row_slice(2, 2, &[f64::NAN, 0., 0., 1.]);
        assert!(rcond_symetric(&nan) < 0.);
    }
}
