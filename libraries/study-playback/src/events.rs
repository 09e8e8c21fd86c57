//! Highlight Events
//!
//! Event-based communication for UI highlighting during narration.
//! Events are queued at key points:
//! - A session becomes (or stops being) the playback target
//! - The active marker changes (never on repeated samples of the same word)

use serde::{Deserialize, Serialize};

/// Events emitted by the playback synchronization layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlightEvent {
    /// A session became the playback target
    SessionLoaded {
        session_id: String,
        /// Whether per-word tracking is active for this session
        highlighting: bool,
    },

    /// The playback target was closed or replaced
    SessionClosed { session_id: String },

    /// The spoken marker changed
    ActiveMarkerChanged {
        previous: Option<usize>,
        current: Option<usize>,
        /// Position that caused the change
        position_ms: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_marker_change() {
        let event = HighlightEvent::ActiveMarkerChanged {
            previous: Some(0),
            current: None,
            position_ms: 0,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["ActiveMarkerChanged"]["previous"], 0);
        assert!(json["ActiveMarkerChanged"]["current"].is_null());
    }
}
