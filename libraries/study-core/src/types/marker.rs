/// Narration timing markers
use crate::error::{Result, StudyError};
use serde::{Deserialize, Serialize};

/// The moment a word begins being spoken
///
/// On the wire this is the narration provider's speech-mark shape
/// (`{"time": 620, "value": "converts"}`); extra fields such as `type`,
/// `start` and `end` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingMarker {
    /// Offset from the start of the audio in milliseconds
    #[serde(rename = "time", alias = "offset_ms")]
    pub offset_ms: u64,

    /// Spoken text
    #[serde(rename = "value", alias = "text")]
    pub text: String,
}

impl TimingMarker {
    pub fn new(offset_ms: u64, text: impl Into<String>) -> Self {
        Self {
            offset_ms,
            text: text.into(),
        }
    }
}

/// Ordered markers for one session, non-decreasing in offset
///
/// Ties are allowed. Validated on construction and immutable afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TimingMarker>", into = "Vec<TimingMarker>")]
pub struct MarkerSequence {
    markers: Vec<TimingMarker>,
}

impl MarkerSequence {
    /// Validate and wrap a marker list
    ///
    /// Fails with `MarkerOutOfOrder` at the first marker whose offset is
    /// lower than its predecessor's.
    pub fn new(markers: Vec<TimingMarker>) -> Result<Self> {
        if let Some(index) = markers
            .windows(2)
            .position(|pair| pair[1].offset_ms < pair[0].offset_ms)
        {
            return Err(StudyError::MarkerOutOfOrder {
                index: index + 1,
                previous_ms: markers[index].offset_ms,
                offset_ms: markers[index + 1].offset_ms,
            });
        }

        Ok(Self { markers })
    }

    pub fn as_slice(&self) -> &[TimingMarker] {
        &self.markers
    }

    pub fn get(&self, index: usize) -> Option<&TimingMarker> {
        self.markers.get(index)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimingMarker> {
        self.markers.iter()
    }

    /// Offset of the first marker, if any
    pub fn first_offset_ms(&self) -> Option<u64> {
        self.markers.first().map(|m| m.offset_ms)
    }
}

impl TryFrom<Vec<TimingMarker>> for MarkerSequence {
    type Error = StudyError;

    fn try_from(markers: Vec<TimingMarker>) -> Result<Self> {
        Self::new(markers)
    }
}

impl From<MarkerSequence> for Vec<TimingMarker> {
    fn from(sequence: MarkerSequence) -> Self {
        sequence.markers
    }
}

impl<'a> IntoIterator for &'a MarkerSequence {
    type Item = &'a TimingMarker;
    type IntoIter = std::slice::Iter<'a, TimingMarker>;

    fn into_iter(self) -> Self::IntoIter {
        self.markers.iter()
    }
}
