//! Kalman filter for a wheeled vehicle.
//!
//! The vehicle state is `[position; velocity]`. A throttle command drives the wheel's angular
//! acceleration, only the position is observed.
//!
//! [`propagate_kalman_filter`] is the per tick entry point of a simulation loop.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{EstimateError, Result};
use crate::estimators::covariance::{predict_step, update_step};
use crate::matrix::{from_rows, Matrix};
use crate::models::{KalmanState, LinearObserveModel, LinearPredictModel};
use crate::noise::{CorrelatedNoise, UncorrelatedNoise};

/// Physical constants of the vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleParams {
    pub wheel_radius: f64,
    /// Velocity saturation of the true vehicle.
    pub max_velocity: f64,
    pub max_angular_acceleration: f64,
}

impl Default for VehicleParams {
    fn default() -> Self {
        VehicleParams {
            wheel_radius: 50.,
            max_velocity: 400.,
            max_angular_acceleration: 10.,
        }
    }
}

impl VehicleParams {
    pub fn validate(&self) -> Result<()> {
        check_positive(self.wheel_radius, "wheel_radius must be positive")?;
        check_positive(self.max_velocity, "max_velocity must be positive")?;
        check_positive(self.max_angular_acceleration, "max_angular_acceleration must be positive")?;
        Ok(())
    }
}

/// Noise the filter assumes, tuned against the reference model's disturbances.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterTuning {
    /// Process noise variances of position and velocity, Q = diag(process_noise).
    pub process_noise: [f64; 2],
    /// Position measurement variance, R = [[measurement_noise]].
    pub measurement_noise: f64,
}

impl Default for FilterTuning {
    fn default() -> Self {
        FilterTuning {
            process_noise: [20., 20.],
            measurement_noise: 10.,
        }
    }
}

impl FilterTuning {
    pub fn process_noise(&self) -> Result<CorrelatedNoise<f64>> {
        CorrelatedNoise::from_uncorrelated(&UncorrelatedNoise {
            q: self.process_noise.to_vec(),
        })
    }

    pub fn measurement_noise(&self) -> Result<CorrelatedNoise<f64>> {
        CorrelatedNoise::from_uncorrelated(&UncorrelatedNoise {
            q: vec![self.measurement_noise],
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.process_noise()?;
        self.measurement_noise()?;
        Ok(())
    }
}

/// Constant velocity transition over `dt`.
pub fn transition_matrix(dt: f64) -> Result<Matrix<f64>> {
    from_rows(&[[1., dt], [0., 1.]])
}

/// Maps a throttle command in to the position and velocity change over `dt`.
pub fn control_matrix(dt: f64, wheel_radius: f64, max_angular_acceleration: f64) -> Result<Matrix<f64>> {
    let a = wheel_radius * max_angular_acceleration;
    from_rows(&[[a * dt * dt * 0.5], [a * dt]])
}

pub fn predict_model(dt: f64, wheel_radius: f64, max_angular_acceleration: f64) -> Result<LinearPredictModel<f64>> {
    check_dt(dt)?;
    Ok(LinearPredictModel {
        Fx: transition_matrix(dt)?,
        Bu: control_matrix(dt, wheel_radius, max_angular_acceleration)?,
    })
}

/// Position only observation.
pub fn observe_model() -> LinearObserveModel<f64> {
    LinearObserveModel {
        Hx: Matrix::from_row_slice(1, 2, &[1., 0.]),
    }
}

/// Advances the estimate by one tick with the default [`FilterTuning`].
///
/// The estimate is always predicted over `dt` with the `throttle` input. It is corrected only if
/// a position measurement `z` (1x1) is available.
pub fn propagate_kalman_filter(
    estimate: &KalmanState<f64>,
    dt: f64,
    throttle: f64,
    wheel_radius: f64,
    max_angular_acceleration: f64,
    z: Option<&Matrix<f64>>,
) -> Result<KalmanState<f64>> {
    let params = VehicleParams {
        wheel_radius,
        max_angular_acceleration,
        ..VehicleParams::default()
    };
    propagate_tuned(estimate, dt, throttle, &params, &FilterTuning::default(), z)
}

/// Advances the estimate by one tick with explicit vehicle constants and noise tuning.
pub fn propagate_tuned(
    estimate: &KalmanState<f64>,
    dt: f64,
    throttle: f64,
    params: &VehicleParams,
    tuning: &FilterTuning,
    z: Option<&Matrix<f64>>,
) -> Result<KalmanState<f64>> {
    params.validate()?;
    let pred = predict_model(dt, params.wheel_radius, params.max_angular_acceleration)?;
    let u = Matrix::from_element(1, 1, throttle);

    let predicted = predict_step(estimate, &pred, &u, &tuning.process_noise()?)?;
    trace!(dt, throttle, measured = z.is_some(), "propagate");

    match z {
        Some(z) => update_step(&predicted, &observe_model(), z, &tuning.measurement_noise()?),
        None => Ok(predicted),
    }
}

fn check_positive(value: f64, message: &'static str) -> Result<()> {
    if value > 0. && value.is_finite() {
        Ok(())
    } else {
        Err(EstimateError::InvalidParameter(message))
    }
}

pub(crate) fn check_dt(dt: f64) -> Result<()> {
    check_positive(dt, "dt must be positive")
}
