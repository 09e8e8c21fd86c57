//! Study Player - Narration Playback
//!
//! Keeps the "currently spoken" word of a narrated study session in step
//! with the audio clock.
//!
//! This crate provides:
//! - Marker lookup (last marker whose moment has begun, binary search)
//! - Media clock conversion (seconds to milliseconds, applied once)
//! - `PlaybackSynchronizer`, gated on the highlighting entitlement
//! - `ActivePlayback`, which swaps the playback target atomically
//! - Highlight events for the UI
//! - Playback rate presets and clock formatting
//!
//! # Architecture
//!
//! Everything here is synchronous and driven by the caller: the media
//! clock's time-update and seek callbacks feed positions in, and the
//! active marker index comes straight back out. The index is recomputed
//! from scratch on every sample, so duplicate or out-of-order samples
//! settle on the right answer as soon as the latest sample is true.
//!
//! # Example
//!
//! ```rust
//! use study_core::{CapabilityConfig, Plan, TimingMarker};
//! use study_entitlements::resolve;
//! use study_playback::PlaybackSynchronizer;
//!
//! let config = CapabilityConfig::from_json(&serde_json::json!({
//!     "features_enabled": { "text_highlighting": true },
//!     "plan_access": { "text_highlighting": ["paid"] }
//! }));
//! let decision = resolve(&config, &Plan::Paid);
//!
//! let mut sync = PlaybackSynchronizer::for_session(
//!     &decision,
//!     vec![
//!         TimingMarker::new(0, "A"),
//!         TimingMarker::new(500, "B"),
//!         TimingMarker::new(1500, "C"),
//!     ],
//! );
//!
//! assert_eq!(sync.on_time_update(0.25), Some(0));
//! assert_eq!(sync.on_time_update(0.6), Some(1));
//! assert_eq!(sync.seek(0.2), Some(0));
//! ```

mod clock;
mod events;
mod lookup;
mod session;
mod synchronizer;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use clock::{format_clock, seconds_to_millis, PlaybackRate, MILLIS_PER_SECOND};
pub use events::HighlightEvent;
pub use lookup::active_marker_index;
pub use session::{ActivePlayback, LoadedSession};
pub use synchronizer::PlaybackSynchronizer;
pub use types::{PlaybackState, SyncPhase};
