//!
//! Vehicle estimate, a linear Kalman filter for a simulated wheeled vehicle.
//!
//! The filter estimates the position and velocity of the vehicle from noisy, position only observations.
//! Its recursion is split in the classic predict and update steps. The covariance update uses the Joseph form,
//! which keeps the covariance symmetric positive semi-definite when rounding errors accumulate over many steps.
//!
//! Alongside the filter a reference model simulates the true vehicle. The true vehicle saturates its velocity and
//! is disturbed by bounded noise; it produces the ground truth and the noisy measurements the filter consumes.
//! The filter and the reference model share no state, they only exchange measurements.
//!
//! All matrix operations are dimension checked. A malformed model is reported as an [`error::EstimateError`]
//! rather than a panic, and propagates to the caller unchanged.
//!
//! # Licensing
//!
//! Permission is hereby granted, free of charge, to any person obtaining a copy of this software and associated documentation files (the "Software"), to deal in the Software without restriction,
//! including without limitation the rights to use, copy, modify, merge, publish, distribute, sublicense, and/or sell copies of the Software,
//! and to permit persons to whom the Software is furnished to do so, subject to the following conditions:
//!
//! The above copyright notice and this permission notice shall be included in all copies or substantial portions of the Software.
//!
//! THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
//! FITNESS FOR A PARTICULAR PURPOSE AND NON INFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY,
//! WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

pub mod config;
pub mod error;
pub mod estimators;
pub mod linalg;
pub mod matrix;
pub mod models;
pub mod noise;
pub mod simulation;
pub mod util;
pub mod vehicle;
