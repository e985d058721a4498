//! True state reference model.
//!
//! Generates the ground truth trajectory of the vehicle and the noisy position measurements a
//! filter consumes. The vehicle follows the filter's linear model except that its velocity
//! saturates, and it is disturbed by bounded non-gaussian noise.
//!
//! Randomness is injected as a [`Disturbance`] so runs can be seeded or made noise free.

use rand_core::RngCore;
use rand_distr::{Distribution, Uniform};

use crate::error::{EstimateError, Result};
use crate::matrix::{multiply, sum, Matrix};
use crate::vehicle::{check_dt, control_matrix, transition_matrix, VehicleParams};

/// Half width of the default disturbance, draws are in [-0.05, 0.05).
pub const DISTURBANCE_HALF_WIDTH: f64 = 0.05;

/// A source of bounded additive disturbances.
pub trait Disturbance {
    fn draw(&mut self) -> f64;
}

/// Uniformly distributed disturbance on [-h, h).
pub struct UniformDisturbance<R: RngCore> {
    rng: R,
    range: Uniform<f64>,
}

impl<R: RngCore> UniformDisturbance<R> {
    /// Disturbance with the default half width.
    pub fn new(rng: R) -> Self {
        UniformDisturbance {
            rng,
            range: Uniform::new(-DISTURBANCE_HALF_WIDTH, DISTURBANCE_HALF_WIDTH),
        }
    }

    pub fn with_half_width(rng: R, half_width: f64) -> Result<Self> {
        if !(half_width > 0.) || !half_width.is_finite() {
            return Err(EstimateError::InvalidParameter("half_width must be positive"));
        }
        Ok(UniformDisturbance {
            rng,
            range: Uniform::new(-half_width, half_width),
        })
    }
}

impl<R: RngCore> Disturbance for UniformDisturbance<R> {
    fn draw(&mut self) -> f64 {
        self.range.sample(&mut self.rng)
    }
}

/// No disturbance at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDisturbance;

impl Disturbance for NoDisturbance {
    fn draw(&mut self) -> f64 {
        0.
    }
}

impl<F: FnMut() -> f64> Disturbance for F {
    fn draw(&mut self) -> f64 {
        self()
    }
}

/// Advances the true vehicle state `[position; velocity]` by `dt` under a `throttle` command.
///
/// x = F(x) + B(u) + [0; w], then the velocity is clamped to +-max_velocity.
pub fn true_state_model(
    prev_x: &Matrix<f64>,
    dt: f64,
    throttle: f64,
    params: &VehicleParams,
    disturbance: &mut dyn Disturbance,
) -> Result<Matrix<f64>> {
    check_dt(dt)?;
    params.validate()?;
    if !throttle.is_finite() {
        return Err(EstimateError::InvalidParameter("throttle must be finite"));
    }
    check_state("true_state_model", prev_x)?;

    let fx = multiply(&transition_matrix(dt)?, prev_x)?;
    let bu = multiply(
        &control_matrix(dt, params.wheel_radius, params.max_angular_acceleration)?,
        &Matrix::from_element(1, 1, throttle),
    )?;
    let noise = Matrix::from_column_slice(2, 1, &[0., disturbance.draw()]);

    let mut x = sum(&[&fx, &bu, &noise])?;
    x[(1, 0)] = x[(1, 0)].max(-params.max_velocity).min(params.max_velocity);
    if !x[(0, 0)].is_finite() {
        return Err(EstimateError::InvalidParameter("position overflow"));
    }
    Ok(x)
}

/// A noisy observation `[[position + w]]` of the true state.
pub fn true_measurement_model(x: &Matrix<f64>, disturbance: &mut dyn Disturbance) -> Result<Matrix<f64>> {
    check_state("true_measurement_model", x)?;
    Ok(Matrix::from_element(1, 1, x[(0, 0)] + disturbance.draw()))
}

/// The state must be a finite `[position; velocity]` column.
fn check_state(op: &'static str, x: &Matrix<f64>) -> Result<()> {
    if x.shape() != (2, 1) {
        return Err(EstimateError::Dimension {
            op,
            left: x.shape(),
            right: (2, 1),
        });
    }
    if x.iter().any(|v| !v.is_finite()) {
        return Err(EstimateError::InvalidParameter("state must be finite"));
    }
    Ok(())
}
