#![allow(non_snake_case)]

//! Covariance state estimation.
//!
//! A discrete Bayesian estimator that uses a Kalman state representation [`KalmanState`] of the system for estimation.
//! The Kalman state is simply the x,X pair the dimensions of both are the dimensions of the system.
//!
//! The pure functions [`predict_step`], [`kalman_gain`] and [`update_step`] return new states.
//! The estimator traits are implemented for [`KalmanState`] on top of them.
//!
//! [`KalmanState`]: ../../models/struct.KalmanState.html

use nalgebra::RealField;
use tracing::trace;

use crate::error::{EstimateError, Result};
use crate::linalg::inverse_spd;
use crate::linalg::rcond::rcond_symetric;
use crate::matrix::{identity, is_symmetric, multiply, quadform, subtract, sum, transpose, Matrix};
use crate::models::{
    Estimator, KalmanEstimator, KalmanState, LinearObserveModel, LinearObserver, LinearPredictModel, LinearPredictor,
};
use crate::noise::CorrelatedNoise;

/// Prediction of a Kalman state.
///
/// x = Fx.x + Bu.u, X = Fx.X.Fx' + Q
pub fn predict_step<N: RealField>(
    state: &KalmanState<N>,
    pred: &LinearPredictModel<N>,
    u: &Matrix<N>,
    noise: &CorrelatedNoise<N>,
) -> Result<KalmanState<N>> {
    let x = sum(&[&multiply(&pred.Fx, &state.x)?, &multiply(&pred.Bu, u)?])?;
    let X = sum(&[&quadform(&pred.Fx, &state.X)?, &noise.Q])?;

    Ok(KalmanState { x, X })
}

/// Kalman gain, X.Hx'.(Hx.X.Hx' + R)^-1
///
/// The innovation covariance is inverted as a scalar when the observation is one dimensional.
/// Fails with [`EstimateError::SingularMatrix`] if it is not positive definite.
pub fn kalman_gain<N: RealField>(X: &Matrix<N>, Hx: &Matrix<N>, R: &Matrix<N>) -> Result<Matrix<N>> {
    let XHt = multiply(X, &transpose(Hx)?)?;
    // S = Hx.X.Hx' + R
    let S = sum(&[&multiply(Hx, &XHt)?, R])?;

    // Inverse innovation covariance
    let SI = inverse_spd(S)?;
    multiply(&XHt, &SI)
}

/// Observation of a Kalman state.
///
/// The covariance update uses the Joseph form
/// X = (I - K.Hx).X.(I - K.Hx)' + K.R.K'
/// which keeps X symmetric positive semi-definite under rounding.
pub fn update_step<N: RealField>(
    state: &KalmanState<N>,
    obs: &LinearObserveModel<N>,
    z: &Matrix<N>,
    noise: &CorrelatedNoise<N>,
) -> Result<KalmanState<N>> {
    let K = kalman_gain(&state.X, &obs.Hx, &noise.Q)?;

    // State update, x + K.(z - Hx.x)
    let innovation = subtract(z, &multiply(&obs.Hx, &state.x)?)?;
    let x = sum(&[&state.x, &multiply(&K, &innovation)?])?;
    trace!(innovation = ?innovation.as_slice(), "observe");

    let IKH = subtract(&identity(obs.Hx.ncols()), &multiply(&K, &obs.Hx)?)?;
    let X = sum(&[&quadform(&IKH, &state.X)?, &quadform(&K, &noise.Q)?])?;

    Ok(KalmanState { x, X })
}

impl<N: RealField> KalmanState<N> {
    pub fn new_zero(d: usize) -> KalmanState<N> {
        KalmanState {
            x: Matrix::zeros(d, 1),
            X: Matrix::zeros(d, d),
        }
    }

    /// The state dimension.
    pub fn dim(&self) -> usize {
        self.x.nrows()
    }
}

impl<N: RealField> Estimator<N> for KalmanState<N> {
    fn state(&self) -> Result<Matrix<N>> {
        Ok(self.x.clone())
    }
}

impl<N: RealField> KalmanEstimator<N> for KalmanState<N> {
    fn init(&mut self, state: &KalmanState<N>) -> Result<N> {
        if state.x.ncols() != 1 || state.X.nrows() != state.x.nrows() {
            return Err(EstimateError::Dimension {
                op: "init",
                left: (state.x.nrows(), state.x.ncols()),
                right: (state.X.nrows(), state.X.ncols()),
            });
        }
        if !is_symmetric(&state.X, symmetry_tolerance()) {
            return Err(EstimateError::NotPositiveSemiDefinite("X"));
        }
        let rcond = rcond_symetric(&state.X);
        // IEC 559 NaN values are never true
        if !(rcond >= N::zero()) {
            return Err(EstimateError::NotPositiveSemiDefinite("X"));
        }

        self.x = state.x.clone();
        self.X = state.X.clone();
        Ok(rcond)
    }

    fn kalman_state(&self) -> Result<KalmanState<N>> {
        Ok(self.clone())
    }
}

impl<N: RealField> LinearPredictor<N> for KalmanState<N> {
    fn predict(
        &mut self,
        pred: &LinearPredictModel<N>,
        u: &Matrix<N>,
        noise: &CorrelatedNoise<N>,
    ) -> Result<()> {
        *self = predict_step(self, pred, u, noise)?;
        Ok(())
    }
}

impl<N: RealField> LinearObserver<N> for KalmanState<N> {
    fn observe(
        &mut self,
        obs: &LinearObserveModel<N>,
        noise: &CorrelatedNoise<N>,
        z: &Matrix<N>,
    ) -> Result<()> {
        *self = update_step(self, obs, z, noise)?;
        Ok(())
    }
}

/// Symmetry tolerance accepted for a supplied covariance.
fn symmetry_tolerance<N: RealField>() -> N {
    nalgebra::convert(1e-9)
}
