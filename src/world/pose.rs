use crate::math::Point2;

/// planar pose, `heading` is unwrapped (not constrained to [-PI, PI))
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pose {
    pub position: Point2,
    pub heading: f64,
}

impl Pose {
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self {
            position: Point2::new(x, y),
            heading,
        }
    }
}

/// measured speed (m/s) and yaw rate (rad/s)
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KinematicState {
    pub linear_speed: f64,
    pub angular_rate: f64,
}

impl KinematicState {
    pub fn new(linear_speed: f64, angular_rate: f64) -> Self {
        Self {
            linear_speed,
            angular_rate,
        }
    }
}

/// what the pose tracker publishes for each odometry sample
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Odometry {
    pub pose: Pose,
    pub kinematics: KinematicState,
    /// s, time since the previous sample, clamped when anomalous
    pub dt: f64,
    /// the measured gap was anomalous and `dt` holds the fallback
    pub dt_clamped: bool,
    /// full turns accumulated by the heading unwrap
    pub revolutions: i64,
}
