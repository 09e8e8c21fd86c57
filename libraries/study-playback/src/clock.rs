//! Media clock helpers
//!
//! The media clock reports positions in seconds while the narration
//! provider stamps markers in milliseconds. `seconds_to_millis` is the
//! only place the two meet.

use serde::{Deserialize, Serialize};

/// Milliseconds per media-clock second
pub const MILLIS_PER_SECOND: f64 = 1000.0;

/// Convert a media-clock position to milliseconds
///
/// Rounds down, so a marker never becomes active before its offset.
/// Negative and non-finite positions return `None`, which the synchronizer
/// treats as "before the first marker".
pub fn seconds_to_millis(position_secs: f64) -> Option<u64> {
    if !position_secs.is_finite() || position_secs < 0.0 {
        return None;
    }

    // Float-to-int casts saturate, so huge positions clamp to u64::MAX
    Some((position_secs * MILLIS_PER_SECOND + FLOAT_NOISE_MS).floor() as u64)
}

/// Absorbs products like `1.499 * 1000.0 = 1498.9999999999998`
const FLOAT_NOISE_MS: f64 = 1e-6;

/// Format a position as `m:ss`
pub fn format_clock(position_secs: f64) -> String {
    let total = if position_secs.is_finite() && position_secs > 0.0 {
        position_secs.floor() as u64
    } else {
        0
    };

    format!("{}:{:02}", total / 60, total % 60)
}

/// Playback speed presets offered by the player
///
/// The media clock reports media time, so the rate never changes marker
/// lookup; it only changes how fast positions advance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackRate {
    #[serde(rename = "0.75")]
    Slow,

    #[default]
    #[serde(rename = "1")]
    Normal,

    #[serde(rename = "1.25")]
    Fast,
}

impl PlaybackRate {
    /// All presets in display order
    pub const ALL: [Self; 3] = [Self::Slow, Self::Normal, Self::Fast];

    pub fn multiplier(self) -> f64 {
        match self {
            Self::Slow => 0.75,
            Self::Normal => 1.0,
            Self::Fast => 1.25,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Slow => "0.75x",
            Self::Normal => "1.0x",
            Self::Fast => "1.25x",
        }
    }

    /// Match a multiplier to a preset
    pub fn from_multiplier(multiplier: f64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|rate| (rate.multiplier() - multiplier).abs() < f64::EPSILON)
    }
}
