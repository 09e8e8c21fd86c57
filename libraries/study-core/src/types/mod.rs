/// Domain types for Study Player
mod capability;
mod marker;
mod plan;
mod session;

pub use capability::{
    CapabilityConfig, Gate, GateAccess, TopicPreset, DEFAULT_TRIAL_LIMIT, HISTORY_VIEW,
};
pub use marker::{MarkerSequence, TimingMarker};
pub use plan::Plan;
pub use session::{GenerateRequest, StudySession};
