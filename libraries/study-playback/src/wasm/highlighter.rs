//! WASM-compatible highlighter

use super::entitlements::WasmEntitlements;
use crate::PlaybackSynchronizer;
use study_core::TimingMarker;
use wasm_bindgen::prelude::*;

/// Per-word highlighter fed by the audio element's clock
///
/// Index results use `-1` for "no active marker".
#[wasm_bindgen]
pub struct WasmHighlighter {
    inner: PlaybackSynchronizer,
}

#[wasm_bindgen]
impl WasmHighlighter {
    /// Create a highlighter for a session's `speech_marks`
    ///
    /// Unreadable or out-of-order marks produce an inert highlighter.
    #[wasm_bindgen(constructor)]
    pub fn new(entitlements: &WasmEntitlements, speech_marks: JsValue) -> Self {
        let markers = serde_wasm_bindgen::from_value::<Vec<TimingMarker>>(speech_marks);

        Self {
            inner: PlaybackSynchronizer::for_decoded_session(&entitlements.decision, markers),
        }
    }

    /// `timeupdate` handler; `position_secs` is `audio.currentTime`
    #[wasm_bindgen(js_name = onTimeUpdate)]
    pub fn on_time_update(&mut self, position_secs: f64) -> i32 {
        to_js_index(self.inner.on_time_update(position_secs))
    }

    /// Seek handler
    pub fn seek(&mut self, position_secs: f64) -> i32 {
        to_js_index(self.inner.seek(position_secs))
    }

    /// Reset button / stop
    pub fn stop(&mut self) {
        self.inner.stop();
    }

    #[wasm_bindgen(getter, js_name = isTracking)]
    pub fn is_tracking(&self) -> bool {
        self.inner.is_tracking()
    }

    #[wasm_bindgen(getter, js_name = activeIndex)]
    pub fn active_index(&self) -> i32 {
        to_js_index(self.inner.active_marker_index())
    }

    #[wasm_bindgen(getter, js_name = activeText)]
    pub fn active_text(&self) -> Option<String> {
        self.inner.active_marker().map(|m| m.text.clone())
    }
}

fn to_js_index(index: Option<usize>) -> i32 {
    index
        .and_then(|i| i32::try_from(i).ok())
        .unwrap_or(-1)
}
