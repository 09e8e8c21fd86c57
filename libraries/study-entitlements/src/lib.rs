//! Study Player - Entitlements
//!
//! Resolves, from a capability configuration and a subscription plan,
//! which session options a user may actually use.
//!
//! This crate provides:
//! - A single pure resolver producing one explicit `EntitlementDecision`
//! - Default duration selection (first unlocked, else first)
//! - Generation request gating (locked options are never sent)
//! - Trial session allowance
//! - Topic preset lookup and prompt rendering
//!
//! Every missing or malformed entitlement resolves to deny. Only the
//! `paid` plan is granted a gate that the config does not mention.
//!
//! # Example
//!
//! ```rust
//! use study_core::{CapabilityConfig, Plan};
//! use study_entitlements::resolve;
//!
//! let config = CapabilityConfig::from_json(&serde_json::json!({
//!     "features_enabled": { "text_highlighting": true },
//!     "allowed_durations": [3, 5, 10],
//!     "plan_access": {
//!         "durations": { "3": ["trial", "paid"] },
//!         "text_highlighting": ["paid"]
//!     }
//! }));
//!
//! let trial = resolve(&config, &Plan::Trial);
//! assert!(!trial.highlighting_available());
//! assert_eq!(trial.default_duration().map(|d| d.minutes), Some(3));
//!
//! let paid = resolve(&config, &Plan::Paid);
//! assert!(paid.highlighting_available());
//! ```

mod allowance;
mod form;
mod resolver;
mod topics;

// Public exports
pub use allowance::{can_generate, sessions_remaining};
pub use form::GenerationForm;
pub use resolver::{resolve, DurationOption, EntitlementDecision, FeatureAccess};
pub use topics::{find_topic, render_prompt, DEFAULT_PROMPT_TEMPLATE};
