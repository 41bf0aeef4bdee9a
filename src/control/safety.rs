use crate::{
    command::Command,
    math::direction_of,
    world::{KinematicState, SafetySnapshot},
};

/// below this measured magnitude a braking channel is commanded to exactly zero
pub const STOPPED_THRESHOLD: f64 = 0.01;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Override {
    /// alarm or soft stop: braking to a halt at the nominal rate
    Braking,
    /// motors disabled: everything zeroed
    MotorsDisabled,
}

/// Takes over the shaped command when a safety input asks for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafetyOverride {
    linear_decel: f64,
    angular_decel: f64,
}

impl SafetyOverride {
    pub fn new(linear_decel: f64, angular_decel: f64) -> Self {
        Self {
            linear_decel,
            angular_decel,
        }
    }

    pub fn apply(
        &self,
        command: Command,
        measured: &KinematicState,
        signals: &SafetySnapshot,
        dt: f64,
    ) -> (Command, Option<Override>) {
        let mut command = command;
        let mut applied = None;

        if signals.wants_stop() {
            command.linear = brake(measured.linear_speed, self.linear_decel, dt);
            command.angular = brake(measured.angular_rate, self.angular_decel, dt);
            applied = Some(Override::Braking);
        }

        // must stay last, nothing gets past a disabled motor
        if !signals.motors_enabled {
            command = Command::zero();
            applied = Some(Override::MotorsDisabled);
        }

        (command, applied)
    }
}

fn brake(measured: f64, decel: f64, dt: f64) -> f64 {
    if measured.abs() < STOPPED_THRESHOLD {
        return 0.;
    }
    let magnitude = (measured.abs() - decel * dt.max(0.)).max(0.);
    direction_of(measured) * magnitude
}
