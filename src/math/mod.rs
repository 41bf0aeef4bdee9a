pub mod point;
pub mod vec;

pub use point::*;
pub use vec::*;

use std::f64::consts::{PI, TAU};

/// heading (rad) of a rotation about the vertical axis given as a quaternion
///
/// qz = sin(theta/2), qw = cos(theta/2) => theta = 2 * atan2(qz, qw)
pub fn heading_from_quaternion(qz: f64, qw: f64) -> f64 {
    2.0 * qz.atan2(qw)
}

/// wraps an angle back into (-PI, PI]
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}

/// -1, 0 or 1. Unlike `f64::signum`, zero maps to zero.
pub fn direction_of(value: f64) -> f64 {
    if value > 0. {
        1.
    } else if value < 0. {
        -1.
    } else {
        0.
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quaternion_of_quarter_turn() {
        let half = PI / 4.;
        let heading = heading_from_quaternion(half.sin(), half.cos());
        assert!((heading - PI / 2.).abs() < 1e-12);
    }

    #[test]
    fn quaternion_of_negative_turn_stays_in_range() {
        let half = -3.0_f64 / 2.;
        let heading = heading_from_quaternion(half.sin(), half.cos());
        assert!((heading + 3.0).abs() < 1e-12);
    }

    #[test]
    fn wrap_angle_folds_full_turns() {
        assert!((wrap_angle(TAU + 0.5) - 0.5).abs() < 1e-12);
        assert!((wrap_angle(-TAU - 0.5) + 0.5).abs() < 1e-12);
        assert!((wrap_angle(PI) - PI).abs() < 1e-12);
    }

    #[test]
    fn direction_of_zero_is_zero() {
        assert_eq!(direction_of(0.), 0.);
        assert_eq!(direction_of(-0.2), -1.);
        assert_eq!(direction_of(3.), 1.);
    }
}
