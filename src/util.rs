//! Small numeric helpers.

use num_traits::{Float, Num, NumCast};

use crate::error::{EstimateError, Result};

/// Remainder of `x / modulus` with the sign of `modulus`.
///
/// For a positive modulus the result is in `[0, modulus)`, also for negative `x`.
pub fn positive_modulo<T: Num + Copy>(x: T, modulus: T) -> Result<T> {
    if modulus.is_zero() {
        return Err(EstimateError::InvalidParameter("modulus must be non-zero"));
    }
    Ok(((x % modulus) + modulus) % modulus)
}

/// Wraps a heading in radians in to `[0, 2π)`.
pub fn wrap_angle<T: Float>(theta: T) -> T {
    let two_pi = <T as NumCast>::from(std::f64::consts::PI * 2.).unwrap_or_else(T::one);
    // two_pi is never zero
    positive_modulo(theta, two_pi).unwrap_or(theta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn negative_values_wrap_up() {
        assert_eq!(positive_modulo(-1, 5).unwrap(), 4);
        assert_eq!(positive_modulo(7, 5).unwrap(), 2);
        assert_eq!(positive_modulo(-10, 5).unwrap(), 0);
        assert_relative_eq!(positive_modulo(-0.5, 2.).unwrap(), 1.5);
    }

    #[test]
    fn zero_modulus() {
        assert!(matches!(positive_modulo(3, 0), Err(EstimateError::InvalidParameter(_))));
        assert!(positive_modulo(3., 0.).is_err());
    }

    #[test]
    fn angles() {
        assert_relative_eq!(wrap_angle(-PI / 2.), 3. * PI / 2., epsilon = 1e-12);
        assert_relative_eq!(wrap_angle(5. * PI), PI, epsilon = 1e-12);
        assert_relative_eq!(wrap_angle(0.25_f32), 0.25_f32, epsilon = 1e-5);
    }
}
