//! Core types for playback synchronization

use serde::{Deserialize, Serialize};

/// Synchronizer state after the latest position sample
///
/// `active_marker` is always derived from `position_ms` and the marker
/// sequence; it is never set directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackState {
    /// Last reported position in milliseconds (negative positions clamp to 0)
    pub position_ms: u64,

    /// Index of the marker being spoken, `None` before the first marker
    pub active_marker: Option<usize>,
}

/// What the synchronizer is currently doing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncPhase {
    /// Highlighting unavailable or no usable markers; never reports an index
    Inert,

    /// Tracking enabled, position precedes the first marker
    Idle,

    /// A marker is active
    Tracking,
}
