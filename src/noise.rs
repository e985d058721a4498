#![allow(non_snake_case)]

//! Additive noise models.
//!
//! Linear Noise models are represented as structs holding their covariance.

use nalgebra::RealField;

use crate::error::{EstimateError, Result};
use crate::matrix::Matrix;

/// Additive noise.
///
/// Noise represented as a the noise variance vector.
#[derive(Debug, Clone, PartialEq)]
pub struct UncorrelatedNoise<N: RealField> {
    /// Noise variance
    pub q: Vec<N>,
}

/// Additive noise.
///
/// Noise represented as a the noise covariance matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelatedNoise<N: RealField> {
    /// Noise covariance
    pub Q: Matrix<N>,
}

impl<N: RealField> CorrelatedNoise<N> {
    /// Creates a CorrelatedNoise from an UncorrelatedNoise.
    ///
    /// Variances must be non negative.
    pub fn from_uncorrelated(uncorrelated: &UncorrelatedNoise<N>) -> Result<Self> {
        let z_size = uncorrelated.q.len();
        if z_size == 0 {
            return Err(EstimateError::Shape("empty noise variance"));
        }
        let mut Q = Matrix::zeros(z_size, z_size);
        for (i, &qi) in uncorrelated.q.iter().enumerate() {
            // IEC 559 NaN values are never true
            if !(qi >= N::zero()) {
                return Err(EstimateError::NotPositiveSemiDefinite("noise variance"));
            }
            Q[(i, i)] = qi;
        }

        Ok(CorrelatedNoise { Q })
    }

    /// The noise dimension.
    pub fn dim(&self) -> usize {
        self.Q.nrows()
    }
}
