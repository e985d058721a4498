#![allow(non_snake_case)]

//! Linear estimation models.
//!
//! State representations are modeled as structs.
//! Common discrete system estimation operations are defined as traits.

use nalgebra::RealField;

use crate::error::Result;
use crate::matrix::Matrix;
use crate::noise::CorrelatedNoise;

/// Kalman State.
///
/// Linear representation as a state vector and the state covariance (symmetric positive semi-definite) matrix.
#[derive(Debug, PartialEq, Clone)]
pub struct KalmanState<N: RealField> {
    /// State vector, a column matrix.
    pub x: Matrix<N>,
    /// State covariance matrix (symmetric positive semi-definite)
    pub X: Matrix<N>,
}

/// Linear prediction model.
///
/// Prediction is represented by a state transition matrix and a control input matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearPredictModel<N: RealField> {
    /// State transition matrix
    pub Fx: Matrix<N>,
    /// Control input matrix
    pub Bu: Matrix<N>,
}

/// Linear observation model.
///
/// Observation is represented by an observation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearObserveModel<N: RealField> {
    /// Observation matrix
    pub Hx: Matrix<N>,
}

/// A state estimator.
pub trait Estimator<N: RealField> {
    /// The estimator's estimate of the system's state.
    fn state(&self) -> Result<Matrix<N>>;
}

/// A Kalman filter (estimator).
///
/// The linear Kalman state representation x,X is used to represent the system.
pub trait KalmanEstimator<N: RealField>: Estimator<N> {
    /// Initialise the estimator with a KalmanState.
    ///
    /// Returns the reciprocal condition estimate of the accepted covariance.
    fn init(&mut self, state: &KalmanState<N>) -> Result<N>;

    /// The estimator's estimate of the system's KalmanState.
    fn kalman_state(&self) -> Result<KalmanState<N>>;
}

/// A linear predictor.
///
/// Uses a Linear model with control input and additive noise.
pub trait LinearPredictor<N: RealField> {
    /// State prediction with a linear prediction model, control input `u` and additive noise.
    fn predict(
        &mut self,
        pred: &LinearPredictModel<N>,
        u: &Matrix<N>,
        noise: &CorrelatedNoise<N>,
    ) -> Result<()>;
}

/// A linear observer with correlated observation noise.
///
/// Uses a Linear observation model with correlated additive observation noise.
pub trait LinearObserver<N: RealField> {
    /// Corrects the estimate with the observation `z`.
    fn observe(
        &mut self,
        obs: &LinearObserveModel<N>,
        noise: &CorrelatedNoise<N>,
        z: &Matrix<N>,
    ) -> Result<()>;
}
