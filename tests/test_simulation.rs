use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use vehicle_estimate::error::EstimateError;
use vehicle_estimate::matrix::{from_rows, Matrix};
use vehicle_estimate::simulation::{
    true_measurement_model, true_state_model, Disturbance, NoDisturbance, UniformDisturbance, DISTURBANCE_HALF_WIDTH,
};
use vehicle_estimate::vehicle::VehicleParams;

fn m(rows: &[&[f64]]) -> Matrix<f64> {
    from_rows(rows).unwrap()
}

#[test]
fn test_noise_free_step() {
    let params = VehicleParams::default();

    // B = [250; 500], velocity saturates at 400
    let x = true_state_model(&m(&[&[0.], &[0.]]), 1., 1., &params, &mut NoDisturbance).unwrap();
    assert_eq!(x, m(&[&[250.], &[400.]]));

    let x = true_state_model(&m(&[&[10.], &[2.]]), 0.1, 0., &params, &mut NoDisturbance).unwrap();
    assert_relative_eq!(x, m(&[&[10.2], &[2.]]), epsilon = 1e-12);

    let x = true_state_model(&m(&[&[0.], &[-390.]]), 0.1, -1., &params, &mut NoDisturbance).unwrap();
    assert_eq!(x[(1, 0)], -400.);
}

#[test]
fn test_disturbance_on_velocity_only() {
    let params = VehicleParams::default();
    let mut constant = || 0.01;

    let x = true_state_model(&m(&[&[1.], &[2.]]), 0.5, 0., &params, &mut constant).unwrap();
    assert_relative_eq!(x, m(&[&[2.], &[2.01]]), epsilon = 1e-12);
}

#[test]
fn test_velocity_stays_bounded() {
    let params = VehicleParams {
        max_velocity: 50.,
        ..VehicleParams::default()
    };
    let throttles = [1e3, -1e3, 1e9, -1e9, 1e12, -1e12];
    let dts = [1e-3, 0.1, 1., 100.];

    for seed in 0..5u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut disturbance = UniformDisturbance::new(StdRng::seed_from_u64(seed + 100));
        let mut x = m(&[&[0.], &[rng.gen_range(-50.0..=50.0)]]);
        for _ in 0..100 {
            let throttle = throttles[rng.gen_range(0..throttles.len())];
            let dt = dts[rng.gen_range(0..dts.len())];
            x = true_state_model(&x, dt, throttle, &params, &mut disturbance).unwrap();
            assert!(x[(1, 0)] >= -params.max_velocity && x[(1, 0)] <= params.max_velocity);
            // Saturates in the direction of the push
            if throttle.abs() >= 1e9 {
                assert_eq!(x[(1, 0)], params.max_velocity * throttle.signum());
            }
        }
    }
}

#[test]
fn test_infinite_throttle_rejected() {
    let params = VehicleParams::default();
    let x = m(&[&[0.], &[0.]]);

    for throttle in &[f64::INFINITY, f64::NEG_INFINITY] {
        assert_eq!(
            true_state_model(&x, 1., *throttle, &params, &mut NoDisturbance),
            Err(EstimateError::InvalidParameter("throttle must be finite"))
        );
    }

    // Full forward speed under a positive throttle stays forward
    let x = true_state_model(&x, 1., 1e6, &params, &mut NoDisturbance).unwrap();
    let x = true_state_model(&x, 1., 1., &params, &mut NoDisturbance).unwrap();
    assert_eq!(x[(1, 0)], params.max_velocity);
}

#[test]
fn test_non_finite_state_rejected() {
    let params = VehicleParams::default();

    for bad in &[m(&[&[f64::INFINITY], &[400.]]), Matrix::from_column_slice(2, 1, &[0., f64::NAN])] {
        assert_eq!(
            true_state_model(bad, 1., 1., &params, &mut NoDisturbance),
            Err(EstimateError::InvalidParameter("state must be finite"))
        );
        assert_eq!(
            true_measurement_model(bad, &mut NoDisturbance),
            Err(EstimateError::InvalidParameter("state must be finite"))
        );
    }

    assert_eq!(
        true_state_model(&m(&[&[f64::MAX], &[0.]]), 1., 1e300, &params, &mut NoDisturbance),
        Err(EstimateError::InvalidParameter("position overflow"))
    );
}

#[test]
fn test_state_model_rejects_bad_input() {
    let params = VehicleParams::default();
    let x = m(&[&[0.], &[0.]]);

    assert_eq!(
        true_state_model(&x, 0., 0., &params, &mut NoDisturbance),
        Err(EstimateError::InvalidParameter("dt must be positive"))
    );
    assert_eq!(
        true_state_model(&x, 0.1, f64::NAN, &params, &mut NoDisturbance),
        Err(EstimateError::InvalidParameter("throttle must be finite"))
    );
    assert!(matches!(
        true_state_model(&m(&[&[0., 0.]]), 0.1, 0., &params, &mut NoDisturbance),
        Err(EstimateError::Dimension { .. })
    ));
    let bad_params = VehicleParams {
        max_velocity: 0.,
        ..params
    };
    assert!(true_state_model(&x, 0.1, 0., &bad_params, &mut NoDisturbance).is_err());
}

#[test]
fn test_measurement_noise_bounded() {
    let x = m(&[&[123.], &[4.]]);
    let mut disturbance = UniformDisturbance::new(StdRng::seed_from_u64(5));

    let mut min = f64::MAX;
    let mut max = f64::MIN;
    for _ in 0..2000 {
        let z = true_measurement_model(&x, &mut disturbance).unwrap();
        assert_eq!(z.shape(), (1, 1));
        let noise = z[(0, 0)] - 123.;
        assert!(noise >= -DISTURBANCE_HALF_WIDTH - 1e-12 && noise < DISTURBANCE_HALF_WIDTH + 1e-12);
        min = min.min(noise);
        max = max.max(noise);
    }
    // Both signs are drawn
    assert!(min < 0. && max > 0.);

    assert_eq!(true_measurement_model(&x, &mut NoDisturbance).unwrap(), m(&[&[123.]]));
    assert!(matches!(
        true_measurement_model(&m(&[&[1., 2.]]), &mut NoDisturbance),
        Err(EstimateError::Dimension { .. })
    ));
    assert_eq!(
        true_measurement_model(&m(&[&[1.], &[2.], &[3.]]), &mut NoDisturbance),
        Err(EstimateError::Dimension {
            op: "true_measurement_model",
            left: (3, 1),
            right: (2, 1),
        })
    );
}

#[test]
fn test_seeded_disturbance_repeats() {
    let mut a = UniformDisturbance::new(StdRng::seed_from_u64(9));
    let mut b = UniformDisturbance::new(StdRng::seed_from_u64(9));
    for _ in 0..10 {
        assert_eq!(a.draw(), b.draw());
    }
}

#[test]
fn test_disturbance_width() {
    let mut wide = UniformDisturbance::with_half_width(StdRng::seed_from_u64(1), 2.).unwrap();
    for _ in 0..100 {
        let w = wide.draw();
        assert!(w >= -2. && w < 2.);
    }

    assert!(UniformDisturbance::with_half_width(StdRng::seed_from_u64(1), 0.).is_err());
    assert!(UniformDisturbance::with_half_width(StdRng::seed_from_u64(1), f64::NAN).is_err());
}
