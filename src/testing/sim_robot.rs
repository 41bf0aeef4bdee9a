//! Kinematic stand-in for a differential drive base.
//!
//! The simulated base tracks the commanded twist perfectly and integrates a
//! unicycle model, which is enough to close the loop around the scheduler.
//!
//! ```
//! use vel_scheduler::{command::Command, testing::sim_robot::SimRobot, world::Pose};
//!
//! let mut robot = SimRobot::new(Pose::default());
//! robot.apply(Command::new(0.5, 0.), 2.0);
//! assert!((robot.pose().position.x - 1.0).abs() < 1e-12);
//! ```

use crate::{
    command::{Command, Twist},
    math::{wrap_angle, Vec2},
    net::udp_transceiver::UdpTransceiver,
    world::{InboundMessage, OdomSample, Orientation, Pose},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{net::SocketAddr, time::Duration};
use tokio::select;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimRobot {
    pose: Pose,
    linear: f64,
    angular: f64,
}

impl SimRobot {
    pub fn new(pose: Pose) -> Self {
        Self {
            pose,
            linear: 0.,
            angular: 0.,
        }
    }

    /// true (unwrapped) pose
    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn velocity(&self) -> Command {
        Command::new(self.linear, self.angular)
    }

    /// follows `command` for `dt` seconds
    pub fn apply(&mut self, command: Command, dt: f64) {
        self.linear = command.linear;
        self.angular = command.angular;

        // integrate over the arc with the midpoint heading
        let mid_heading = self.pose.heading + 0.5 * self.angular * dt;
        self.pose.position = self.pose.position + Vec2::from_heading(mid_heading) * (self.linear * dt);
        self.pose.heading += self.angular * dt;
    }

    /// what an odometry source would publish right now, heading wrapped
    pub fn sample(&self) -> OdomSample {
        let half = wrap_angle(self.pose.heading) / 2.;
        OdomSample {
            x: self.pose.position.x,
            y: self.pose.position.y,
            orientation: Orientation::Quaternion {
                qz: half.sin(),
                qw: half.cos(),
            },
            linear: self.linear,
            angular: self.angular,
        }
    }

    /// same as `sample` with uniform noise of at most `amplitude` on every field
    pub fn noisy_sample(&self, rng: &mut impl Rng, amplitude: f64) -> OdomSample {
        if amplitude <= 0. {
            return self.sample();
        }
        let mut noise = || rng.gen_range(-amplitude..=amplitude);
        let position = self.pose.position + Vec2::new(noise(), noise());
        let half = wrap_angle(self.pose.heading + noise()) / 2.;
        OdomSample {
            x: position.x,
            y: position.y,
            orientation: Orientation::Quaternion {
                qz: half.sin(),
                qw: half.cos(),
            },
            linear: self.linear + noise(),
            angular: self.angular + noise(),
        }
    }
}

impl Default for SimRobot {
    fn default() -> Self {
        Self::new(Pose::default())
    }
}

/// Runs a simulated base over udp: twists are received on `command_addr`,
/// odometry is sent to `odometry_target` every `period`.
pub async fn run_sim_robot(
    command_addr: SocketAddr,
    odometry_target: SocketAddr,
    period: Duration,
    noise_amplitude: f64,
) -> Result<(), crate::net::UdpTransceiverCreationError> {
    let mut commands = UdpTransceiver::bind(command_addr).await?;
    let odometry = UdpTransceiver::connect(odometry_target).await?;
    info!(
        "simulated robot listening for twists on {}, publishing odometry to {}",
        command_addr, odometry_target
    );

    let mut robot = SimRobot::default();
    let mut last_command = Command::zero();
    let mut interval = tokio::time::interval(period);
    let mut rng = StdRng::from_entropy();
    loop {
        select! {
            _ = interval.tick() => {
                robot.apply(last_command, period.as_secs_f64());
                let sample = robot.noisy_sample(&mut rng, noise_amplitude);
                if let Err(e) = odometry.send(&InboundMessage::Odometry(sample)).await {
                    warn!("couldn't publish odometry: {}", e);
                }
            }
            received = commands.receive::<Twist>() => match received {
                Ok(twist) => last_command = twist.into(),
                Err(e) => warn!("bad twist: {}", e),
            }
        }
    }
}
