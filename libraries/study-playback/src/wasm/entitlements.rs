//! WASM-compatible entitlement decision

use study_core::{CapabilityConfig, Plan};
use study_entitlements::{resolve, EntitlementDecision};
use tracing::warn;
use wasm_bindgen::prelude::*;

/// Entitlement decision for one `(config, plan)` pair
///
/// Build a new one whenever the config or the plan changes.
#[wasm_bindgen]
pub struct WasmEntitlements {
    pub(crate) decision: EntitlementDecision,
}

#[wasm_bindgen]
impl WasmEntitlements {
    /// Resolve from the config object returned by the config endpoint
    ///
    /// A config that cannot be read at all resolves as an empty config,
    /// which denies everything.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, plan: &str) -> Self {
        console_error_panic_hook::set_once();

        let config = serde_wasm_bindgen::from_value::<serde_json::Value>(config)
            .map(|value| CapabilityConfig::from_json(&value))
            .unwrap_or_else(|e| {
                warn!(error = %e, "Unreadable capability config, denying everything");
                CapabilityConfig::default()
            });

        Self {
            decision: resolve(&config, &Plan::from(plan)),
        }
    }

    #[wasm_bindgen(getter, js_name = examModeAvailable)]
    pub fn exam_mode_available(&self) -> bool {
        self.decision.exam_mode_available()
    }

    #[wasm_bindgen(getter, js_name = examModeVisible)]
    pub fn exam_mode_visible(&self) -> bool {
        self.decision.exam_mode.visible
    }

    #[wasm_bindgen(getter, js_name = highlightingAvailable)]
    pub fn highlighting_available(&self) -> bool {
        self.decision.highlighting_available()
    }

    #[wasm_bindgen(getter, js_name = highlightingVisible)]
    pub fn highlighting_visible(&self) -> bool {
        self.decision.highlighting.visible
    }

    /// Duration preselected before the user picks one
    #[wasm_bindgen(getter, js_name = defaultDuration)]
    pub fn default_duration(&self) -> Option<u32> {
        self.decision.default_duration().map(|d| d.minutes)
    }

    /// Whether to show the upgrade hint next to the duration picker
    #[wasm_bindgen(getter, js_name = hasLockedDurations)]
    pub fn has_locked_durations(&self) -> bool {
        self.decision.has_locked_durations()
    }

    #[wasm_bindgen(js_name = isDurationLocked)]
    pub fn is_duration_locked(&self, minutes: u32) -> bool {
        !self.decision.duration(minutes).is_some_and(|d| !d.locked)
    }

    /// Durations as `[{ minutes, locked }]`
    pub fn durations(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.decision.durations).map_err(JsValue::from)
    }
}
