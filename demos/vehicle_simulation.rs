//! Operation of the vehicle filter in a simulation loop.
//!
//! The true vehicle is driven by a slowly oscillating throttle. Every `measurement_interval` ticks
//! its position is measured and the filter corrects its estimate.
//!
//! Run with an optional configuration file:
//! `cargo run --example vehicle_simulation -- vehicle.toml`

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use vehicle_estimate::config::Config;
use vehicle_estimate::matrix::Matrix;
use vehicle_estimate::models::KalmanState;
use vehicle_estimate::simulation::{true_measurement_model, true_state_model, UniformDisturbance};
use vehicle_estimate::vehicle::propagate_tuned;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let sim = &config.simulation;
    info!(?config, "starting simulation");

    let mut disturbance = UniformDisturbance::new(StdRng::seed_from_u64(sim.seed));

    // The true vehicle starts at rest, the filter knows little about it
    let mut true_x = Matrix::zeros(2, 1);
    let mut estimate = KalmanState {
        x: Matrix::zeros(2, 1),
        X: Matrix::identity(2, 2) * sim.initial_variance,
    };

    for step in 0..sim.steps {
        let t = step as f64 * sim.dt;
        let throttle = (t * 0.5).sin();

        true_x = true_state_model(&true_x, sim.dt, throttle, &config.vehicle, &mut disturbance)?;
        let z = if step % sim.measurement_interval == 0 {
            Some(true_measurement_model(&true_x, &mut disturbance)?)
        } else {
            None
        };
        estimate = propagate_tuned(&estimate, sim.dt, throttle, &config.vehicle, &config.filter, z.as_ref())?;

        if step % 60 == 0 {
            info!(
                t,
                throttle,
                true_position = true_x[(0, 0)],
                true_velocity = true_x[(1, 0)],
                position = estimate.x[(0, 0)],
                velocity = estimate.x[(1, 0)],
                position_variance = estimate.X[(0, 0)],
                "tick"
            );
        }
    }

    println!(
        "final position {:.2} (true {:.2}), velocity {:.2} (true {:.2})",
        estimate.x[(0, 0)],
        true_x[(0, 0)],
        estimate.x[(1, 0)],
        true_x[(1, 0)]
    );
    Ok(())
}
