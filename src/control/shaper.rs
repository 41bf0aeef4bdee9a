use tracing::trace;

/// A profile that is already braking can't be caught up at the nominal rate,
/// so slowing down uses this multiple of the acceleration limit.
pub const DECEL_CATCH_UP_FACTOR: f64 = 1.2;

/// Rate limits a command toward its scheduled value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandShaper {
    accel: f64,
}

impl CommandShaper {
    pub fn new(accel: f64) -> Self {
        Self { accel }
    }

    /// next command from the measured value, never past `target`
    pub fn shape(&self, measured: f64, target: f64, dt: f64) -> f64 {
        let dt = dt.max(0.);
        if measured < target {
            let ramped = measured + self.accel * dt;
            trace!("ramping up: {:.3} -> {:.3}", ramped.min(target), target);
            ramped.min(target)
        } else if measured > target {
            let ramped = measured - DECEL_CATCH_UP_FACTOR * self.accel * dt;
            trace!("slowing down: {:.3} -> {:.3}", ramped.max(target), target);
            ramped.max(target)
        } else {
            target
        }
    }

    /// Same as `shape` but in the frame of the intended turn `direction` (±1),
    /// so "up" always means "faster in the direction we want to turn".
    pub fn shape_toward(&self, measured: f64, target: f64, direction: f64, dt: f64) -> f64 {
        if direction == 0. {
            return self.shape(measured, target, dt);
        }
        direction * self.shape(direction * measured, direction * target, dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 0.05;

    #[test]
    fn ramps_up_at_nominal_rate() {
        let shaper = CommandShaper::new(0.3);
        let v = shaper.shape(0.1, 0.6, DT);
        assert!((v - (0.1 + 0.3 * DT)).abs() < 1e-12);
    }

    #[test]
    fn ramps_down_faster_than_nominal() {
        let shaper = CommandShaper::new(0.3);
        let v = shaper.shape(0.6, 0.1, DT);
        assert!((v - (0.6 - 1.2 * 0.3 * DT)).abs() < 1e-12);
    }

    #[test]
    fn holds_when_on_target() {
        let shaper = CommandShaper::new(0.3);
        assert_eq!(shaper.shape(0.42, 0.42, DT), 0.42);
    }

    #[test]
    fn never_overshoots_whatever_the_dt() {
        let shaper = CommandShaper::new(0.3);
        for dt in [0., 0.001, 0.05, 0.1, 1., 10., 1e6] {
            for (measured, target) in [(0., 0.6), (0.59, 0.6), (0.6, 0.), (0.31, 0.3), (-0.2, 0.1)]
            {
                let v = shaper.shape(measured, target, dt);
                if measured <= target {
                    assert!(v <= target && v >= measured, "{measured} -> {target} gave {v}");
                } else {
                    assert!(v >= target && v <= measured, "{measured} -> {target} gave {v}");
                }
            }
        }
    }

    #[test]
    fn negative_dt_does_not_move() {
        let shaper = CommandShaper::new(0.3);
        assert_eq!(shaper.shape(0.2, 0.6, -1.), 0.2);
        assert_eq!(shaper.shape(0.2, 0.0, -1.), 0.2);
    }

    #[test]
    fn clockwise_turn_ramps_toward_negative_rates() {
        let shaper = CommandShaper::new(0.3);
        let omega = shaper.shape_toward(-0.1, -0.6, -1., DT);
        assert!((omega - (-0.1 - 0.3 * DT)).abs() < 1e-12);

        let omega = shaper.shape_toward(-0.6, -0.2, -1., DT);
        assert!((omega - (-0.6 + 1.2 * 0.3 * DT)).abs() < 1e-12);

        // never past the target
        assert_eq!(shaper.shape_toward(-0.59, -0.6, -1., 1.), -0.6);
        assert_eq!(shaper.shape_toward(-0.3, -0.29, -1., 1.), -0.29);
    }

    #[test]
    fn spinning_the_wrong_way_ramps_back_at_nominal_rate() {
        let shaper = CommandShaper::new(0.3);
        let omega = shaper.shape_toward(0.2, -0.6, -1., DT);
        assert!((omega - (0.2 - 0.3 * DT)).abs() < 1e-12);
    }
}
