//! Study Player Core
//!
//! Platform-agnostic types, traits, and error handling shared by the
//! entitlement resolver, the narration playback synchronizer and the
//! HTTP providers.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `CapabilityConfig`, `Plan`, `TimingMarker`, `StudySession`
//! - **Provider Traits**: `ConfigProvider`, `SessionProvider`
//! - **Error Handling**: Unified `StudyError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use study_core::{CapabilityConfig, Plan, TimingMarker, MarkerSequence};
//!
//! let config = CapabilityConfig::from_json(&serde_json::json!({
//!     "allowed_durations": [3, 5, 10],
//!     "plan_access": { "durations": { "3": ["trial", "paid"] } }
//! }));
//! assert_eq!(config.allowed_durations, vec![3, 5, 10]);
//!
//! let plan: Plan = "trial".into();
//! assert_eq!(plan, Plan::Trial);
//!
//! let markers = MarkerSequence::new(vec![
//!     TimingMarker::new(0, "Photosynthesis"),
//!     TimingMarker::new(620, "converts"),
//! ])
//! .unwrap();
//! assert_eq!(markers.len(), 2);
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, StudyError};
pub use traits::{ConfigProvider, SessionProvider};
pub use types::{
    CapabilityConfig, GateAccess, GenerateRequest, Gate, MarkerSequence, Plan, StudySession,
    TimingMarker, TopicPreset,
};
