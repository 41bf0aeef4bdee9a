use super::{
    safety::{Override, SafetyOverride},
    sequencer::{Remaining, SegmentSequencer, SequencerState},
    shaper::CommandShaper,
};
use crate::{
    command::Command,
    config::{Config, KinematicLimits, PlanEndPolicy, SegmentSpec},
    math::direction_of,
    trajectories::{trapezoid::is_angle_reached, Trapezoid, VelocityProfile},
    world::{Odometry, SafetySnapshot},
};
use tracing::{debug, info, warn};

/// What happened during one control tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    /// the command to emit
    pub command: Command,
    /// the ideal values from the profiles, before shaping
    pub scheduled: Command,
    /// `None` once the plan is finished
    pub remaining: Option<Remaining>,
    pub override_applied: Option<Override>,
    /// the active segment completed during this tick
    pub segment_completed: bool,
}

impl TickReport {
    fn holding() -> Self {
        Self {
            command: Command::zero(),
            scheduled: Command::zero(),
            remaining: None,
            override_applied: None,
            segment_completed: false,
        }
    }
}

/// Per-tick logic of the control loop: profile → shaper → safety → overshoot
/// clamps, then segment transition. Holds no I/O so it can be driven by hand.
#[derive(Debug, Clone)]
pub struct VelScheduler {
    linear_profile: Trapezoid,
    angular_profile: Trapezoid,
    linear_shaper: CommandShaper,
    angular_shaper: CommandShaper,
    safety: SafetyOverride,
    sequencer: SegmentSequencer,
    last_override: Option<Override>,
}

impl VelScheduler {
    pub fn new(limits: &KinematicLimits, segments: Vec<SegmentSpec>, policy: PlanEndPolicy) -> Self {
        Self {
            linear_profile: Trapezoid::new(limits.v_max, limits.a_max),
            angular_profile: Trapezoid::new(limits.omega_max, limits.alpha_max),
            linear_shaper: CommandShaper::new(limits.a_max),
            angular_shaper: CommandShaper::new(limits.alpha_max),
            safety: SafetyOverride::new(limits.a_max, limits.alpha_max),
            sequencer: SegmentSequencer::new(segments, policy),
            last_override: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.limits, config.segments.clone(), config.plan_end)
    }

    pub fn sequencer(&self) -> &SegmentSequencer {
        &self.sequencer
    }

    pub fn is_finished(&self) -> bool {
        self.sequencer.is_finished()
    }

    pub fn tick(&mut self, odom: &Odometry, signals: &SafetySnapshot) -> TickReport {
        if self.sequencer.state() == SequencerState::Idle {
            self.sequencer.start(odom.pose);
            self.log_segment_plan();
        }

        let Some(remaining) = self.sequencer.update(&odom.pose) else {
            return TickReport::holding();
        };

        let scheduled = Command::new(
            self.linear_profile.scheduled(remaining.distance),
            self.angular_profile.scheduled_signed(remaining.angle),
        );
        let shaped = Command::new(
            self.linear_shaper
                .shape(odom.kinematics.linear_speed, scheduled.linear, odom.dt),
            self.angular_shaper.shape_toward(
                odom.kinematics.angular_rate,
                scheduled.angular,
                direction_of(remaining.angle),
                odom.dt,
            ),
        );

        let (mut command, override_applied) =
            self.safety
                .apply(shaped, &odom.kinematics, signals, odom.dt);
        self.log_override_change(override_applied);

        // went too far already
        if remaining.distance <= 0. {
            command.linear = 0.;
        }
        if is_angle_reached(remaining.angle) {
            command.angular = 0.;
        }

        debug!(
            "to go: {:.3}m {:.3}rad | sched: v = {:.3}, omega = {:.3} | cmd: v = {:.3}, omega = {:.3}",
            remaining.distance,
            remaining.angle,
            scheduled.linear,
            scheduled.angular,
            command.linear,
            command.angular
        );

        let segment_completed = remaining.is_complete();
        if segment_completed && self.sequencer.advance(odom.pose) {
            self.log_segment_plan();
        }

        TickReport {
            command,
            scheduled,
            remaining: Some(remaining),
            override_applied,
            segment_completed,
        }
    }

    fn log_override_change(&mut self, current: Option<Override>) {
        if current == self.last_override {
            return;
        }
        match current {
            Some(Override::Braking) => warn!("lidar alarm or soft stop, braking to a halt"),
            Some(Override::MotorsDisabled) => warn!("motors disabled, commanding zero"),
            None => info!("safety override released"),
        }
        self.last_override = current;
    }

    fn log_segment_plan(&self) {
        let Some(segment) = self.sequencer.current_segment() else {
            return;
        };
        let linear = self.linear_profile.plan(segment.distance);
        let angular = self.angular_profile.plan(segment.rotation.abs());
        info!(
            "linear plan: decel from {:.3}m to go, cruise {:.3}m, ~{:.2}s | angular plan: decel from {:.3}rad to go, cruise {:.3}rad, ~{:.2}s",
            self.linear_profile.decel_distance(),
            linear.cruise_distance,
            linear.total_time,
            self.angular_profile.decel_distance(),
            angular.cruise_distance,
            angular.total_time
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{KinematicState, Pose};
    use std::f64::consts::FRAC_PI_2;

    const DT: f64 = 0.05;

    fn odom(x: f64, heading: f64, v: f64, omega: f64) -> Odometry {
        Odometry {
            pose: Pose::new(x, 0., heading),
            kinematics: KinematicState::new(v, omega),
            dt: DT,
            dt_clamped: false,
            revolutions: 0,
        }
    }

    fn scheduler(segments: Vec<SegmentSpec>) -> VelScheduler {
        VelScheduler::new(&KinematicLimits::default(), segments, PlanEndPolicy::Halt)
    }

    #[test]
    fn first_tick_ramps_up_from_rest() {
        let mut scheduler = scheduler(vec![SegmentSpec::translation(2.0)]);
        let report = scheduler.tick(&odom(0., 0., 0., 0.), &SafetySnapshot::default());
        assert_eq!(report.scheduled.linear, 0.6);
        assert!((report.command.linear - 0.3 * DT).abs() < 1e-12);
        assert_eq!(report.command.angular, 0.);
        assert!(!report.segment_completed);
    }

    #[test]
    fn braking_zone_scheduled_velocity() {
        let mut scheduler = scheduler(vec![SegmentSpec::translation(2.0)]);
        scheduler.tick(&odom(0., 0., 0., 0.), &SafetySnapshot::default());
        let report = scheduler.tick(&odom(1.5, 0., 0.6, 0.), &SafetySnapshot::default());
        let remaining = report.remaining.expect("active");
        assert!((remaining.distance - 0.5).abs() < 1e-9);
        let expected = 0.5 * (2.0_f64 * 0.5 * 0.3).sqrt();
        assert!((report.scheduled.linear - expected).abs() < 1e-9);
        // 1.2 * a_max catch up
        assert!((report.command.linear - (0.6 - 1.2 * 0.3 * DT)).abs() < 1e-9);
    }

    #[test]
    fn overshoot_forces_linear_to_zero() {
        let mut scheduler = scheduler(vec![
            SegmentSpec::translation(2.0),
            SegmentSpec::rotation(FRAC_PI_2),
        ]);
        scheduler.tick(&odom(0., 0., 0., 0.), &SafetySnapshot::default());
        let report = scheduler.tick(&odom(2.05, 0., 0.2, 0.), &SafetySnapshot::default());
        assert_eq!(report.command.linear, 0.);
        assert_eq!(report.scheduled.linear, 0.);
        assert!(report.segment_completed);
        assert_eq!(
            scheduler.sequencer().current_segment(),
            Some(SegmentSpec::rotation(FRAC_PI_2))
        );
    }

    #[test]
    fn rotation_turns_in_the_requested_direction() {
        let mut scheduler = scheduler(vec![SegmentSpec::rotation(-FRAC_PI_2)]);
        let report = scheduler.tick(&odom(0., 0., 0., 0.), &SafetySnapshot::default());
        assert_eq!(report.scheduled.angular, -0.6);
        assert!((report.command.angular + 0.3 * DT).abs() < 1e-12);
        assert_eq!(report.command.linear, 0.);
    }

    #[test]
    fn rotation_reached_within_epsilon_stops_and_completes() {
        let mut scheduler = scheduler(vec![SegmentSpec::rotation(FRAC_PI_2)]);
        scheduler.tick(&odom(0., 0., 0., 0.), &SafetySnapshot::default());
        let report = scheduler.tick(
            &odom(0., FRAC_PI_2 - 0.005, 0., 0.05),
            &SafetySnapshot::default(),
        );
        assert_eq!(report.scheduled.angular, 0.);
        assert_eq!(report.command.angular, 0.);
        assert!(report.segment_completed);
        assert!(scheduler.is_finished());
    }

    #[test]
    fn alarm_decelerates_from_measured_speed() {
        let mut scheduler = scheduler(vec![SegmentSpec::translation(5.0)]);
        let alarm = SafetySnapshot {
            alarm_active: true,
            ..Default::default()
        };
        scheduler.tick(&odom(0., 0., 0., 0.), &SafetySnapshot::default());
        let report = scheduler.tick(&odom(1., 0., 0.5, 0.), &alarm);
        assert!((report.command.linear - (0.5 - 0.3 * DT)).abs() < 1e-12);
        assert_eq!(report.override_applied, Some(Override::Braking));
    }

    #[test]
    fn motors_disabled_wins_over_everything() {
        let mut scheduler = scheduler(vec![SegmentSpec::new(5.0, FRAC_PI_2)]);
        let disabled = SafetySnapshot {
            motors_enabled: false,
            ..Default::default()
        };
        let report = scheduler.tick(&odom(0., 0., 0.3, 0.3), &disabled);
        assert!(report.scheduled.linear > 0.);
        assert!(report.scheduled.angular > 0.);
        assert_eq!(report.command, Command::zero());
        assert_eq!(report.override_applied, Some(Override::MotorsDisabled));
    }

    #[test]
    fn finished_plan_holds_zero() {
        let mut scheduler = scheduler(vec![SegmentSpec::translation(0.)]);
        let report = scheduler.tick(&odom(0., 0., 0., 0.), &SafetySnapshot::default());
        assert!(report.segment_completed);
        assert!(scheduler.is_finished());

        let report = scheduler.tick(&odom(0., 0., 0.1, 0.1), &SafetySnapshot::default());
        assert_eq!(report.command, Command::zero());
        assert_eq!(report.remaining, None);
    }
}
