//! Active playback target
//!
//! Holds at most one loaded session. Loading a new session replaces the
//! previous session and its synchronizer in a single assignment, so no
//! state from the old session can be observed afterwards.

use crate::events::HighlightEvent;
use crate::synchronizer::PlaybackSynchronizer;
use crate::types::PlaybackState;
use study_core::{StudySession, TimingMarker};
use study_entitlements::EntitlementDecision;
use tracing::info;

/// A session together with its synchronizer
#[derive(Debug, Clone)]
pub struct LoadedSession {
    session: StudySession,
    synchronizer: PlaybackSynchronizer,
}

impl LoadedSession {
    pub fn session(&self) -> &StudySession {
        &self.session
    }

    pub fn synchronizer(&self) -> &PlaybackSynchronizer {
        &self.synchronizer
    }
}

/// The session currently targeted by the audio player
#[derive(Debug, Default)]
pub struct ActivePlayback {
    current: Option<LoadedSession>,
    pending_events: Vec<HighlightEvent>,
}

impl ActivePlayback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `session` the playback target
    ///
    /// Any previous session is torn down, including events it had not
    /// delivered yet. Highlighting is enabled only if `decision` allows it
    /// and the session carries a valid, non-empty marker sequence.
    pub fn load(&mut self, session: StudySession, decision: &EntitlementDecision) -> bool {
        let synchronizer =
            PlaybackSynchronizer::for_session(decision, session.speech_marks.clone());
        let highlighting = synchronizer.is_tracking();
        let session_id = session.id.clone();

        let previous = self.current.replace(LoadedSession {
            session,
            synchronizer,
        });

        self.pending_events.clear();
        if let Some(previous) = previous {
            self.pending_events.push(HighlightEvent::SessionClosed {
                session_id: previous.session.id,
            });
        }

        info!(session_id = %session_id, highlighting, "Loaded playback session");
        self.pending_events.push(HighlightEvent::SessionLoaded {
            session_id,
            highlighting,
        });

        highlighting
    }

    /// Discard the playback target
    pub fn close(&mut self) {
        if let Some(previous) = self.current.take() {
            info!(session_id = %previous.session.id, "Closed playback session");
            self.pending_events.clear();
            self.pending_events.push(HighlightEvent::SessionClosed {
                session_id: previous.session.id,
            });
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&LoadedSession> {
        self.current.as_ref()
    }

    pub fn session(&self) -> Option<&StudySession> {
        self.current.as_ref().map(|loaded| &loaded.session)
    }

    /// Time-update sample; `None` when nothing is loaded
    pub fn on_time_update(&mut self, position_secs: f64) -> Option<usize> {
        self.current
            .as_mut()
            .and_then(|loaded| loaded.synchronizer.on_time_update(position_secs))
    }

    /// Seek sample; `None` when nothing is loaded
    pub fn seek(&mut self, position_secs: f64) -> Option<usize> {
        self.current
            .as_mut()
            .and_then(|loaded| loaded.synchronizer.seek(position_secs))
    }

    /// Caller-level stop of the current session
    pub fn stop(&mut self) {
        if let Some(loaded) = self.current.as_mut() {
            loaded.synchronizer.stop();
        }
    }

    pub fn state(&self) -> Option<PlaybackState> {
        self.current
            .as_ref()
            .map(|loaded| loaded.synchronizer.state())
    }

    pub fn active_marker(&self) -> Option<&TimingMarker> {
        self.current
            .as_ref()
            .and_then(|loaded| loaded.synchronizer.active_marker())
    }

    /// Take all queued events: session changes first, then marker changes
    pub fn drain_events(&mut self) -> Vec<HighlightEvent> {
        let mut events = std::mem::take(&mut self.pending_events);
        if let Some(loaded) = self.current.as_mut() {
            events.extend(loaded.synchronizer.drain_events());
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use study_core::{CapabilityConfig, Plan};
    use study_entitlements::resolve;

    fn paid() -> EntitlementDecision {
        let config = CapabilityConfig::from_json(&json!({
            "features_enabled": { "text_highlighting": true },
            "plan_access": { "text_highlighting": ["paid"] }
        }));
        resolve(&config, &Plan::Paid)
    }

    fn session(id: &str, marks: &[(u64, &str)]) -> StudySession {
        StudySession {
            id: id.to_string(),
            topic: "Biology".to_string(),
            content: marks.iter().map(|(_, w)| *w).collect::<Vec<_>>().join(" "),
            audio_url: Some(format!("/api/v1/study/audio/{id}")),
            speech_marks: marks
                .iter()
                .map(|&(offset, word)| TimingMarker::new(offset, word))
                .collect(),
            listen_count: 0,
            created_at: None,
        }
    }

    #[test]
    fn nothing_loaded_reports_none() {
        let mut playback = ActivePlayback::new();
        assert!(!playback.is_loaded());
        assert_eq!(playback.on_time_update(1.0), None);
        assert_eq!(playback.seek(1.0), None);
        assert!(playback.state().is_none());
        assert!(playback.drain_events().is_empty());
    }

    #[test]
    fn switching_sessions_discards_previous_state() {
        let mut playback = ActivePlayback::new();
        let decision = paid();

        playback.load(session("first", &[(0, "A"), (500, "B"), (1500, "C")]), &decision);
        assert_eq!(playback.on_time_update(2.0), Some(2));

        assert!(playback.load(session("second", &[(200, "X"), (400, "Y")]), &decision));
        assert_eq!(playback.session().map(|s| s.id.as_str()), Some("second"));
        assert_eq!(playback.state(), Some(PlaybackState::default()));
        assert!(playback.active_marker().is_none());

        // Undelivered marker changes from the first session are gone
        let events = playback.drain_events();
        assert_eq!(
            events,
            vec![
                HighlightEvent::SessionClosed {
                    session_id: "first".to_string()
                },
                HighlightEvent::SessionLoaded {
                    session_id: "second".to_string(),
                    highlighting: true
                },
            ]
        );

        assert_eq!(playback.on_time_update(0.3), Some(0));
        assert_eq!(playback.active_marker().map(|m| m.text.as_str()), Some("X"));
    }

    #[test]
    fn close_discards_session() {
        let mut playback = ActivePlayback::new();
        playback.load(session("only", &[(0, "A")]), &paid());
        playback.on_time_update(0.1);

        playback.close();
        assert!(!playback.is_loaded());
        assert_eq!(playback.on_time_update(0.1), None);
        assert_eq!(
            playback.drain_events(),
            vec![HighlightEvent::SessionClosed {
                session_id: "only".to_string()
            }]
        );
    }

    #[test]
    fn stop_clears_active_marker() {
        let mut playback = ActivePlayback::new();
        playback.load(session("only", &[(0, "A"), (500, "B")]), &paid());
        playback.on_time_update(0.8);

        playback.stop();
        assert_eq!(playback.state(), Some(PlaybackState::default()));
    }

    #[test]
    fn session_without_markers_plays_without_highlighting() {
        let mut playback = ActivePlayback::new();
        assert!(!playback.load(session("plain", &[]), &paid()));
        assert_eq!(playback.on_time_update(3.0), None);
        assert_eq!(playback.state().map(|s| s.position_ms), Some(3000));
    }
}
