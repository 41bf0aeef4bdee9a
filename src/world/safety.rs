use crate::IgnoreMutexErr;
use std::sync::{Arc, Mutex};
use tracing::info;

/// state of the externally owned safety inputs
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SafetySnapshot {
    pub motors_enabled: bool,
    pub alarm_active: bool,
    pub soft_stop: bool,
}

impl Default for SafetySnapshot {
    fn default() -> Self {
        Self {
            motors_enabled: true,
            alarm_active: false,
            soft_stop: false,
        }
    }
}

impl SafetySnapshot {
    pub fn wants_stop(&self) -> bool {
        self.alarm_active || self.soft_stop
    }
}

/// Shared safety inputs, cheap to clone. All three flags live behind a single
/// lock so the control loop never reads a half-applied update.
#[derive(Clone, Default, Debug)]
pub struct SafetySignals {
    state: Arc<Mutex<SafetySnapshot>>,
}

impl SafetySignals {
    pub fn snapshot(&self) -> SafetySnapshot {
        *self.state.lock().unwrap_ignore_poison()
    }

    pub fn set_motors_enabled(&self, enabled: bool) {
        self.state.lock().unwrap_ignore_poison().motors_enabled = enabled;
        info!("motors {}", if enabled { "enabled" } else { "disabled" });
    }

    pub fn set_alarm(&self, active: bool) {
        self.state.lock().unwrap_ignore_poison().alarm_active = active;
        info!("lidar alarm {}", if active { "on" } else { "off" });
    }

    pub fn set_soft_stop(&self, active: bool) {
        self.state.lock().unwrap_ignore_poison().soft_stop = active;
        info!("soft stop {}", if active { "on" } else { "off" });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_allow_motion() {
        let signals = SafetySignals::default();
        let snapshot = signals.snapshot();
        assert!(snapshot.motors_enabled);
        assert!(!snapshot.wants_stop());
    }

    #[test]
    fn clones_share_state() {
        let signals = SafetySignals::default();
        let producer = signals.clone();
        producer.set_alarm(true);
        producer.set_motors_enabled(false);
        assert_eq!(
            signals.snapshot(),
            SafetySnapshot {
                motors_enabled: false,
                alarm_active: true,
                soft_stop: false,
            }
        );

        producer.set_alarm(false);
        producer.set_soft_stop(true);
        assert!(signals.snapshot().wants_stop());
    }
}
