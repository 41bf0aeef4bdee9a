use crate::{
    config::{PlanEndPolicy, SegmentSpec},
    trajectories::trapezoid::is_angle_reached,
    world::Pose,
};
use tracing::info;

/// Where we are in the active segment, relative to where it started.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SegmentProgress {
    pub start_pose: Pose,
    pub segment_index: usize,
    pub distance_done: f64,
    pub angle_done: f64,
}

impl SegmentProgress {
    fn new(segment_index: usize, start_pose: Pose) -> Self {
        Self {
            start_pose,
            segment_index,
            distance_done: 0.,
            angle_done: 0.,
        }
    }
}

/// distance (m) and signed angle (rad) left on the active segment
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Remaining {
    pub distance: f64,
    pub angle: f64,
}

impl Remaining {
    pub fn is_complete(&self) -> bool {
        self.distance <= 0. && is_angle_reached(self.angle)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SequencerState {
    /// no pose received yet
    Idle,
    Active(SegmentProgress),
    /// every segment is done and the plan doesn't repeat
    Finished,
}

/// Walks the ordered segment list.
///
/// Progress is always measured from the pose recorded when the current segment
/// started, never accumulated across segments.
#[derive(Clone, Debug)]
pub struct SegmentSequencer {
    segments: Vec<SegmentSpec>,
    policy: PlanEndPolicy,
    state: SequencerState,
}

impl SegmentSequencer {
    pub fn new(segments: Vec<SegmentSpec>, policy: PlanEndPolicy) -> Self {
        Self {
            segments,
            policy,
            state: SequencerState::Idle,
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, SequencerState::Finished)
    }

    pub fn current_segment(&self) -> Option<SegmentSpec> {
        match self.state {
            SequencerState::Active(progress) => self.segments.get(progress.segment_index).copied(),
            _ => None,
        }
    }

    /// starts the first segment from `pose`, no-op unless idle
    pub fn start(&mut self, pose: Pose) {
        if self.state != SequencerState::Idle {
            return;
        }
        self.load(0, pose);
    }

    /// refreshes the progress of the active segment and returns what's left
    pub fn update(&mut self, pose: &Pose) -> Option<Remaining> {
        let SequencerState::Active(ref mut progress) = self.state else {
            return None;
        };
        let segment = self.segments.get(progress.segment_index).copied()?;

        progress.distance_done = progress.start_pose.position.distance_to(pose.position);
        progress.angle_done = pose.heading - progress.start_pose.heading;

        Some(Remaining {
            distance: segment.distance - progress.distance_done,
            angle: segment.rotation - progress.angle_done,
        })
    }

    /// moves to the next segment starting from `pose`, returns false once the plan is over
    pub fn advance(&mut self, pose: Pose) -> bool {
        let SequencerState::Active(progress) = self.state else {
            return false;
        };

        let next = progress.segment_index + 1;
        if next < self.segments.len() {
            self.load(next, pose);
            return true;
        }

        match self.policy {
            PlanEndPolicy::Halt => {
                info!("completed all {} segments, holding still", self.segments.len());
                self.state = SequencerState::Finished;
                false
            }
            PlanEndPolicy::Repeat => {
                info!("completed all {} segments, starting over", self.segments.len());
                self.load(0, pose);
                true
            }
        }
    }

    fn load(&mut self, index: usize, pose: Pose) {
        let Some(segment) = self.segments.get(index) else {
            self.state = SequencerState::Finished;
            return;
        };
        info!(
            "segment {}: length {:.3}m, rotation {:.3}rad, start pose x = {:.3}, y = {:.3}, phi = {:.3}",
            index,
            segment.distance,
            segment.rotation,
            pose.position.x,
            pose.position.y,
            pose.heading
        );
        self.state = SequencerState::Active(SegmentProgress::new(index, pose));
    }
}
