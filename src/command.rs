use crate::math::Vec3;
use serde::{Deserialize, Serialize};

/// forward speed (m/s) and yaw rate (rad/s) sent to the base
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Command {
    pub linear: f64,
    pub angular: f64,
}

impl Command {
    pub fn new(linear: f64, angular: f64) -> Self {
        Self { linear, angular }
    }

    pub fn zero() -> Self {
        Self::default()
    }
}

/// Wire form of a `Command`. A differential drive base only uses `linear.x`
/// and `angular.z`, everything else stays at zero.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, Default, PartialEq)]
pub struct Twist {
    pub linear: Vec3,
    pub angular: Vec3,
}

impl From<Command> for Twist {
    fn from(command: Command) -> Self {
        Self {
            linear: Vec3::new(command.linear, 0., 0.),
            angular: Vec3::new(0., 0., command.angular),
        }
    }
}

impl From<Twist> for Command {
    fn from(twist: Twist) -> Self {
        Self::new(twist.linear.x, twist.angular.z)
    }
}
