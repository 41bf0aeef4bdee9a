pub mod trapezoid;

pub use trapezoid::{Trapezoid, TrapezoidPlan, ANGLE_REACHED_EPSILON, BRAKING_MARGIN};

/// A velocity schedule driven by what is left to travel, not by time.
pub trait VelocityProfile {
    /// distance needed to brake from cruise to a halt
    fn decel_distance(&self) -> f64;
    /// target velocity when `remaining` is left, never negative
    fn scheduled(&self, remaining: f64) -> f64;
}
