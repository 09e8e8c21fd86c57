//! WASM bindings for study-playback
//!
//! Exposes the entitlement decision and the highlighter to the browser
//! player. Both are synchronous; no network calls originate here.

pub mod entitlements;
pub mod highlighter;

pub use entitlements::WasmEntitlements;
pub use highlighter::WasmHighlighter;
