//! Active marker lookup

use study_core::TimingMarker;

/// Index of the marker being spoken at `position_ms`
///
/// The last marker whose offset is `<= position_ms`; among markers sharing
/// an offset the later one wins. `None` when the position precedes the
/// first marker or there are no markers. Past the last marker the last
/// index stays active.
///
/// `markers` must be non-decreasing in offset (see `MarkerSequence`).
pub fn active_marker_index(markers: &[TimingMarker], position_ms: u64) -> Option<usize> {
    markers
        .partition_point(|marker| marker.offset_ms <= position_ms)
        .checked_sub(1)
}
