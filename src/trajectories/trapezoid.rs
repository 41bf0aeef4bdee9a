// Trapezoidal velocity schedule: accelerate, cruise, brake.
// Used for both the linear (m, m/s) and the angular (rad, rad/s) channels.

use super::VelocityProfile;
use crate::math::direction_of;

/// scale applied to the exact stopping velocity sqrt(2*d*a) in the braking zone
pub const BRAKING_MARGIN: f64 = 0.5;

/// below this remaining angle (rad), the rotation is considered done
pub const ANGLE_REACHED_EPSILON: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trapezoid {
    max_vel: f64,
    max_accel: f64,
}

/// Timing of a full move of a given length starting and ending at rest.
///
/// When the move is too short to reach cruise speed, `cruise_distance` and
/// `cruise_time` are negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapezoidPlan {
    pub accel_time: f64,
    pub accel_distance: f64,
    pub cruise_time: f64,
    pub cruise_distance: f64,
    pub decel_time: f64,
    pub decel_distance: f64,
    pub total_time: f64,
}

impl Trapezoid {
    pub fn new(max_vel: f64, max_accel: f64) -> Self {
        Self { max_vel, max_accel }
    }

    /// signed target rate for a signed remaining angle, 0 once within `ANGLE_REACHED_EPSILON`
    pub fn scheduled_signed(&self, remaining: f64) -> f64 {
        if is_angle_reached(remaining) {
            return 0.;
        }
        direction_of(remaining) * self.scheduled(remaining.abs())
    }

    pub fn plan(&self, length: f64) -> TrapezoidPlan {
        // assumes start from rest and symmetric accel/decel
        let accel_time = self.max_vel / self.max_accel;
        let decel_time = accel_time;
        let accel_distance = 0.5 * self.max_accel * accel_time * accel_time;
        let decel_distance = accel_distance;
        let cruise_distance = length - accel_distance - decel_distance;
        let cruise_time = cruise_distance / self.max_vel;

        TrapezoidPlan {
            accel_time,
            accel_distance,
            cruise_time,
            cruise_distance,
            decel_time,
            decel_distance,
            total_time: accel_time + cruise_time + decel_time,
        }
    }
}

pub fn is_angle_reached(remaining: f64) -> bool {
    remaining.abs() <= ANGLE_REACHED_EPSILON
}

impl VelocityProfile for Trapezoid {
    fn decel_distance(&self) -> f64 {
        self.max_vel * self.max_vel / (2. * self.max_accel)
    }

    fn scheduled(&self, remaining: f64) -> f64 {
        if remaining <= 0. {
            // at goal or overshot
            0.
        } else if remaining <= self.decel_distance() {
            // v = a * t_halt, d = 0.5 * a * t_halt² => v = sqrt(2 * d * a)
            BRAKING_MARGIN * (2. * remaining * self.max_accel).sqrt()
        } else {
            self.max_vel
        }
    }
}
