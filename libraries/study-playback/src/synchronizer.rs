//! Playback synchronizer
//!
//! Maps the media clock onto the session's marker sequence. The active
//! index is a pure function of `(markers, position)`, recomputed on every
//! sample; the synchronizer only remembers it to report changes.

use crate::clock::seconds_to_millis;
use crate::events::HighlightEvent;
use crate::lookup::active_marker_index;
use crate::types::{PlaybackState, SyncPhase};
use study_core::{MarkerSequence, TimingMarker};
use study_entitlements::EntitlementDecision;
use tracing::{debug, trace, warn};

/// Tracks the spoken marker for one session
#[derive(Debug, Clone)]
pub struct PlaybackSynchronizer {
    markers: MarkerSequence,

    /// False when highlighting is unavailable or there is nothing to track
    tracking: bool,

    state: PlaybackState,

    pending_events: Vec<HighlightEvent>,
}

impl PlaybackSynchronizer {
    /// Synchronizer over a validated sequence
    ///
    /// An empty sequence produces an inert synchronizer.
    pub fn new(markers: MarkerSequence) -> Self {
        let tracking = !markers.is_empty();
        Self {
            markers,
            tracking,
            state: PlaybackState::default(),
            pending_events: Vec::new(),
        }
    }

    /// Synchronizer that follows the clock but never reports a marker
    pub fn inert() -> Self {
        Self::new(MarkerSequence::default())
    }

    /// Synchronizer for a session's raw markers
    ///
    /// Inert unless the decision grants highlighting and the markers are
    /// non-empty and non-decreasing. An out-of-order sequence disables
    /// highlighting for the session instead of failing.
    pub fn for_session(decision: &EntitlementDecision, markers: Vec<TimingMarker>) -> Self {
        if !decision.highlighting_available() {
            debug!(plan = %decision.plan, "Highlighting unavailable, synchronizer inert");
            return Self::inert();
        }

        match MarkerSequence::new(markers) {
            Ok(sequence) => {
                debug!(markers = sequence.len(), "Synchronizer ready");
                Self::new(sequence)
            }
            Err(e) => {
                warn!(error = %e, "Rejecting marker sequence, highlighting disabled");
                Self::inert()
            }
        }
    }

    /// Synchronizer for markers that still had to be decoded
    ///
    /// A decode failure is logged and produces an inert synchronizer, the
    /// same outcome as an out-of-order sequence.
    pub fn for_decoded_session<E: std::fmt::Display>(
        decision: &EntitlementDecision,
        markers: std::result::Result<Vec<TimingMarker>, E>,
    ) -> Self {
        match markers {
            Ok(markers) => Self::for_session(decision, markers),
            Err(e) => {
                warn!(error = %e, "Unreadable speech marks, highlighting disabled");
                Self::inert()
            }
        }
    }

    /// Time-update sample from continuous playback (seconds)
    pub fn on_time_update(&mut self, position_secs: f64) -> Option<usize> {
        self.sync(position_secs)
    }

    /// Explicit seek (seconds); may move the index backward or to `None`
    pub fn seek(&mut self, position_secs: f64) -> Option<usize> {
        trace!(position_secs, "Seek");
        self.sync(position_secs)
    }

    /// Caller-level stop: back to the start with no active marker
    ///
    /// Reaching the end of the audio does not need this; the last marker
    /// simply stays active.
    pub fn stop(&mut self) {
        self.apply(0, None);
    }

    fn sync(&mut self, position_secs: f64) -> Option<usize> {
        let position_ms = seconds_to_millis(position_secs);

        let active = if self.tracking {
            position_ms.and_then(|ms| active_marker_index(self.markers.as_slice(), ms))
        } else {
            None
        };

        self.apply(position_ms.unwrap_or(0), active);
        active
    }

    fn apply(&mut self, position_ms: u64, active: Option<usize>) {
        let previous = self.state.active_marker;
        self.state = PlaybackState {
            position_ms,
            active_marker: active,
        };

        if previous != active {
            trace!(?previous, ?active, position_ms, "Active marker changed");
            self.pending_events.push(HighlightEvent::ActiveMarkerChanged {
                previous,
                current: active,
                position_ms,
            });
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn active_marker_index(&self) -> Option<usize> {
        self.state.active_marker
    }

    /// Marker currently being spoken
    pub fn active_marker(&self) -> Option<&TimingMarker> {
        self.state
            .active_marker
            .and_then(|index| self.markers.get(index))
    }

    pub fn phase(&self) -> SyncPhase {
        match (self.tracking, self.state.active_marker) {
            (false, _) => SyncPhase::Inert,
            (true, None) => SyncPhase::Idle,
            (true, Some(_)) => SyncPhase::Tracking,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn markers(&self) -> &MarkerSequence {
        &self.markers
    }

    /// Take all queued events (oldest first)
    pub fn drain_events(&mut self) -> Vec<HighlightEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

impl Default for PlaybackSynchronizer {
    fn default() -> Self {
        Self::inert()
    }
}
