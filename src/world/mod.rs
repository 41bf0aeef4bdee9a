mod pose;
mod pose_tracker;
mod safety;

// EXPORTS
pub use pose::{KinematicState, Odometry, Pose};
pub use pose_tracker::{OdomSample, Orientation, PoseTracker};
pub use safety::{SafetySignals, SafetySnapshot};

use crate::IgnoreMutexErr;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::time::Instant;

/// Everything the odometry source and the safety producers push to us.
#[derive(Deserialize, Serialize, Clone, Copy, Debug, PartialEq)]
#[serde(tag = "type")]
pub enum InboundMessage {
    Odometry(OdomSample),
    MotorsEnabled { enabled: bool },
    LidarAlarm { active: bool },
    SoftStop { active: bool },
}

/// Latest known state of the robot, shared between the inbound task (writer)
/// and the control loop (reader). Light to clone, the cells are behind arcs.
#[derive(Clone, Default, Debug)]
pub struct World {
    odometry: Arc<Mutex<Option<Odometry>>>,
    pub signals: SafetySignals,
}

impl World {
    /// `None` until the first odometry sample arrived
    pub fn latest_odometry(&self) -> Option<Odometry> {
        *self.odometry.lock().unwrap_ignore_poison()
    }

    pub fn set_odometry(&self, odometry: Odometry) {
        *self.odometry.lock().unwrap_ignore_poison() = Some(odometry);
    }

    /// latest value wins, nothing is queued
    pub fn handle_message(&self, message: InboundMessage, tracker: &mut PoseTracker, now: Instant) {
        match message {
            InboundMessage::Odometry(sample) => self.set_odometry(tracker.update(&sample, now)),
            InboundMessage::MotorsEnabled { enabled } => self.signals.set_motors_enabled(enabled),
            InboundMessage::LidarAlarm { active } => self.signals.set_alarm(active),
            InboundMessage::SoftStop { active } => self.signals.set_soft_stop(active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OdometryConfig;

    #[test]
    fn no_odometry_before_first_sample() {
        let world = World::default();
        assert!(world.latest_odometry().is_none());
    }

    #[test]
    fn messages_update_the_shared_state() {
        let world = World::default();
        let reader = world.clone();
        let mut tracker = PoseTracker::new(OdometryConfig::default());

        let sample = OdomSample {
            x: 0.5,
            y: 0.,
            orientation: Orientation::Yaw { yaw: 0.1 },
            linear: 0.3,
            angular: 0.,
        };
        world.handle_message(InboundMessage::Odometry(sample), &mut tracker, Instant::now());
        world.handle_message(
            InboundMessage::LidarAlarm { active: true },
            &mut tracker,
            Instant::now(),
        );

        let odom = reader.latest_odometry().expect("odometry was pushed");
        assert_eq!(odom.pose.position.x, 0.5);
        assert_eq!(odom.kinematics.linear_speed, 0.3);
        assert!(reader.signals.snapshot().alarm_active);
    }

    #[test]
    fn inbound_messages_are_tagged_json() {
        let message: InboundMessage =
            serde_json::from_str(r#"{"type":"MotorsEnabled","enabled":false}"#)
                .expect("valid message");
        assert_eq!(message, InboundMessage::MotorsEnabled { enabled: false });

        let message: InboundMessage = serde_json::from_str(
            r#"{"type":"Odometry","x":1.0,"y":2.0,"orientation":{"yaw":0.0},"linear":0.1,"angular":0.0}"#,
        )
        .expect("valid message");
        assert!(matches!(message, InboundMessage::Odometry(s) if s.x == 1.0));
    }
}
