pub mod safety;
pub mod scheduler;
pub mod sequencer;
pub mod shaper;

pub use safety::{Override, SafetyOverride};
pub use scheduler::{TickReport, VelScheduler};
pub use sequencer::{Remaining, SegmentProgress, SegmentSequencer, SequencerState};
pub use shaper::CommandShaper;
