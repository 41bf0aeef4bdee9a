use super::pose::{KinematicState, Odometry, Pose};
use crate::{config::OdometryConfig, math::heading_from_quaternion};
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};
use tokio::time::Instant;
use tracing::{trace, warn};

/// a raw heading jump bigger than this between two samples is a ±PI crossing
const WRAP_DETECTION_THRESHOLD: f64 = 1.5 * PI;

#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq)]
#[serde(untagged)]
pub enum Orientation {
    /// planar quaternion (rotation about the vertical axis)
    Quaternion { qz: f64, qw: f64 },
    /// heading in (-PI, PI]
    Yaw { yaw: f64 },
}

impl Orientation {
    pub fn heading(&self) -> f64 {
        match *self {
            Orientation::Quaternion { qz, qw } => heading_from_quaternion(qz, qw),
            Orientation::Yaw { yaw } => yaw,
        }
    }
}

/// pose/velocity estimate as produced by the odometry source
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq)]
pub struct OdomSample {
    pub x: f64,
    pub y: f64,
    pub orientation: Orientation,
    /// forward speed, m/s
    pub linear: f64,
    /// yaw rate, rad/s
    pub angular: f64,
}

/// Turns raw odometry samples into continuous `Odometry`.
///
/// The raw heading is wrapped, so each time it jumps by more than 1.5 PI between
/// two consecutive samples we count a full turn in the matching direction.
#[derive(Debug, Clone)]
pub struct PoseTracker {
    config: OdometryConfig,
    last_raw_heading: Option<f64>,
    revolutions: i64,
    last_received: Option<Instant>,
}

impl PoseTracker {
    pub fn new(config: OdometryConfig) -> Self {
        Self {
            config,
            last_raw_heading: None,
            revolutions: 0,
            last_received: None,
        }
    }

    pub fn revolutions(&self) -> i64 {
        self.revolutions
    }

    pub fn update(&mut self, sample: &OdomSample, received_at: Instant) -> Odometry {
        let (dt, dt_clamped) = self.update_dt(received_at);

        let raw_heading = sample.orientation.heading();
        if let Some(last) = self.last_raw_heading {
            let delta = last - raw_heading;
            if delta > WRAP_DETECTION_THRESHOLD {
                self.revolutions += 1;
            } else if delta < -WRAP_DETECTION_THRESHOLD {
                self.revolutions -= 1;
            }
        }
        self.last_raw_heading = Some(raw_heading);

        let odometry = Odometry {
            pose: Pose::new(
                sample.x,
                sample.y,
                self.revolutions as f64 * TAU + raw_heading,
            ),
            kinematics: KinematicState::new(sample.linear, sample.angular),
            dt,
            dt_clamped,
            revolutions: self.revolutions,
        };
        trace!(
            "odom: x = {:.3}, y = {:.3}, phi = {:.3}, v = {:.3}, omega = {:.3}",
            odometry.pose.position.x,
            odometry.pose.position.y,
            odometry.pose.heading,
            odometry.kinematics.linear_speed,
            odometry.kinematics.angular_rate
        );
        odometry
    }

    /// measured gap since the previous sample, and whether it had to be replaced
    fn update_dt(&mut self, received_at: Instant) -> (f64, bool) {
        let previous = self.last_received.replace(received_at);
        let Some(previous) = previous else {
            // nothing to measure against yet
            return (self.config.dt_fallback, false);
        };

        let dt = received_at.saturating_duration_since(previous).as_secs_f64();
        if dt > self.config.large_dt_threshold {
            warn!(
                "large odometry dt ({:.3}s), using {:.3}s instead",
                dt, self.config.dt_fallback
            );
            return (self.config.dt_fallback, true);
        }
        (dt, false)
    }
}
