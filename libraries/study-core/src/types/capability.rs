/// Capability configuration delivered by the config provider
use crate::error::StudyError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Trial session allowance used when the config does not set one
pub const DEFAULT_TRIAL_LIMIT: u32 = 3;

/// `features_enabled` toggle for the session history list
pub const HISTORY_VIEW: &str = "history_view";

/// Named gate in `plan_access`
///
/// `ExamMode` and `TextHighlighting` share their key with the matching
/// `features_enabled` toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gate {
    Durations,
    ExamMode,
    TextHighlighting,
}

impl Gate {
    /// Key used in `plan_access` and `features_enabled`
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Durations => "durations",
            Self::ExamMode => "exam_mode",
            Self::TextHighlighting => "text_highlighting",
        }
    }
}

impl std::fmt::Display for Gate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// One `plan_access` entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GateAccess {
    /// Plans allowed to use the whole gate
    Plans(BTreeSet<String>),

    /// Plans allowed per option, keyed by the option rendered as a string
    /// (durations use `"3"`, `"5"`, ...)
    PerOption(BTreeMap<String, BTreeSet<String>>),
}

/// Topic preset offered in the topic picker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicPreset {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Prompt template; `{topic}` is replaced with the topic name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_template: Option<String>,
}

/// Deployment-wide capability configuration
///
/// Read-only to the core. Fetched once per request and never mutated in
/// place; a new fetch produces a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilityConfig {
    /// Whether each feature exists at all in this deployment
    #[serde(default)]
    pub features_enabled: BTreeMap<String, bool>,

    /// Candidate session durations in minutes, in display order
    #[serde(default)]
    pub allowed_durations: Vec<u32>,

    /// Gate name to plan access; missing gates are default-deny
    #[serde(default)]
    pub plan_access: BTreeMap<String, GateAccess>,

    #[serde(default)]
    pub topics: Vec<TopicPreset>,

    /// Number of sessions a trial account may generate
    #[serde(default = "default_trial_limit")]
    pub trial_limit_sessions: u32,
}

fn default_trial_limit() -> u32 {
    DEFAULT_TRIAL_LIMIT
}

impl Default for CapabilityConfig {
    fn default() -> Self {
        Self {
            features_enabled: BTreeMap::new(),
            allowed_durations: Vec::new(),
            plan_access: BTreeMap::new(),
            topics: Vec::new(),
            trial_limit_sessions: DEFAULT_TRIAL_LIMIT,
        }
    }
}

impl CapabilityConfig {
    /// Decode a config leniently
    ///
    /// Each field is decoded on its own. Absent fields take their default;
    /// wrong-shaped fields are logged as `ConfigMalformed` and replaced by
    /// the restrictive default. Never fails.
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            report(&StudyError::config_malformed("<root>", "expected an object"));
            return Self::default();
        };

        let config = Self {
            features_enabled: decode_features(object),
            allowed_durations: decode_durations(object),
            plan_access: decode_plan_access(object),
            topics: decode_topics(object),
            trial_limit_sessions: decode_field(object, "trial_limit_sessions")
                .unwrap_or(DEFAULT_TRIAL_LIMIT),
        };

        debug!(
            durations = config.allowed_durations.len(),
            gates = config.plan_access.len(),
            topics = config.topics.len(),
            "Decoded capability config"
        );

        config
    }

    /// Whether a feature exists in this deployment (absent = disabled)
    pub fn is_feature_enabled(&self, gate: Gate) -> bool {
        self.features_enabled
            .get(gate.key())
            .copied()
            .unwrap_or(false)
    }

    /// Whether past sessions may be listed (absent = disabled)
    pub fn is_history_enabled(&self) -> bool {
        self.features_enabled
            .get(HISTORY_VIEW)
            .copied()
            .unwrap_or(false)
    }

    /// Raw `plan_access` entry for a gate
    pub fn gate_access(&self, gate: Gate) -> Option<&GateAccess> {
        self.plan_access.get(gate.key())
    }
}

fn report(err: &StudyError) {
    warn!(error = %err, "Degrading capability config to restrictive default");
}

/// Field lookup that treats `null` like an absent field
fn field<'a>(object: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    object.get(name).filter(|v| !v.is_null())
}

fn decode_field<T: DeserializeOwned>(object: &Map<String, Value>, name: &str) -> Option<T> {
    let value = field(object, name)?;
    match serde_json::from_value(value.clone()) {
        Ok(decoded) => Some(decoded),
        Err(e) => {
            report(&StudyError::config_malformed(name, e.to_string()));
            None
        }
    }
}

fn decode_features(object: &Map<String, Value>) -> BTreeMap<String, bool> {
    let Some(value) = field(object, "features_enabled") else {
        return BTreeMap::new();
    };
    let Some(entries) = value.as_object() else {
        report(&StudyError::config_malformed(
            "features_enabled",
            "expected an object",
        ));
        return BTreeMap::new();
    };

    entries
        .iter()
        .filter_map(|(name, flag)| match flag.as_bool() {
            Some(enabled) => Some((name.clone(), enabled)),
            None => {
                report(&StudyError::config_malformed(
                    format!("features_enabled.{name}"),
                    "expected a boolean",
                ));
                None
            }
        })
        .collect()
}

fn decode_durations(object: &Map<String, Value>) -> Vec<u32> {
    let Some(value) = field(object, "allowed_durations") else {
        return Vec::new();
    };
    let Some(items) = value.as_array() else {
        report(&StudyError::config_malformed(
            "allowed_durations",
            "expected an array",
        ));
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            match item.as_u64().and_then(|m| u32::try_from(m).ok()) {
                Some(minutes) if minutes > 0 => Some(minutes),
                _ => {
                    report(&StudyError::config_malformed(
                        format!("allowed_durations[{i}]"),
                        format!("expected a positive integer, got {item}"),
                    ));
                    None
                }
            }
        })
        .collect()
}

fn decode_plan_access(object: &Map<String, Value>) -> BTreeMap<String, GateAccess> {
    let Some(value) = field(object, "plan_access") else {
        return BTreeMap::new();
    };
    let Some(entries) = value.as_object() else {
        report(&StudyError::config_malformed("plan_access", "expected an object"));
        return BTreeMap::new();
    };

    entries
        .iter()
        .filter_map(|(gate, access)| {
            match serde_json::from_value::<GateAccess>(access.clone()) {
                Ok(decoded) => Some((gate.clone(), decoded)),
                Err(_) => {
                    report(&StudyError::config_malformed(
                        format!("plan_access.{gate}"),
                        "expected a list of plans or a map of option to plans",
                    ));
                    None
                }
            }
        })
        .collect()
}

fn decode_topics(object: &Map<String, Value>) -> Vec<TopicPreset> {
    let Some(value) = field(object, "topics") else {
        return Vec::new();
    };
    let Some(items) = value.as_array() else {
        report(&StudyError::config_malformed("topics", "expected an array"));
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(
            |(i, item)| match serde_json::from_value::<TopicPreset>(item.clone()) {
                Ok(topic) => Some(topic),
                Err(e) => {
                    report(&StudyError::config_malformed(
                        format!("topics[{i}]"),
                        e.to_string(),
                    ));
                    None
                }
            },
        )
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_config() {
        let config = CapabilityConfig::from_json(&json!({
            "features_enabled": { "exam_mode": true, "text_highlighting": false },
            "allowed_durations": [3, 5, 10],
            "plan_access": {
                "durations": { "3": ["trial", "paid"], "5": ["paid"] },
                "exam_mode": ["paid"]
            },
            "topics": [
                { "name": "Biology", "description": "Cells and life" }
            ],
            "trial_limit_sessions": 5
        }));

        assert!(config.is_feature_enabled(Gate::ExamMode));
        assert!(!config.is_feature_enabled(Gate::TextHighlighting));
        assert_eq!(config.allowed_durations, vec![3, 5, 10]);
        assert!(matches!(
            config.gate_access(Gate::Durations),
            Some(GateAccess::PerOption(_))
        ));
        assert!(matches!(
            config.gate_access(Gate::ExamMode),
            Some(GateAccess::Plans(_))
        ));
        assert_eq!(config.topics[0].name, "Biology");
        assert_eq!(config.trial_limit_sessions, 5);
    }

    #[test]
    fn absent_fields_take_restrictive_defaults() {
        let config = CapabilityConfig::from_json(&json!({}));
        assert_eq!(config, CapabilityConfig::default());
        assert!(!config.is_feature_enabled(Gate::ExamMode));
        assert_eq!(config.trial_limit_sessions, DEFAULT_TRIAL_LIMIT);
    }

    #[test]
    fn non_object_root_degrades_to_default() {
        let config = CapabilityConfig::from_json(&json!([1, 2, 3]));
        assert_eq!(config, CapabilityConfig::default());
    }

    #[test]
    fn bad_durations_are_dropped_individually() {
        let config = CapabilityConfig::from_json(&json!({
            "allowed_durations": [3, 0, -5, "ten", 2.5, 10]
        }));
        assert_eq!(config.allowed_durations, vec![3, 10]);
    }

    #[test]
    fn wrong_shaped_durations_field_is_empty() {
        let config = CapabilityConfig::from_json(&json!({ "allowed_durations": "3,5" }));
        assert!(config.allowed_durations.is_empty());
    }

    #[test]
    fn non_boolean_feature_flag_is_disabled() {
        let config = CapabilityConfig::from_json(&json!({
            "features_enabled": { "exam_mode": "yes", "text_highlighting": true }
        }));
        assert!(!config.is_feature_enabled(Gate::ExamMode));
        assert!(config.is_feature_enabled(Gate::TextHighlighting));
    }

    #[test]
    fn malformed_gate_is_dropped() {
        let config = CapabilityConfig::from_json(&json!({
            "plan_access": { "exam_mode": "paid", "text_highlighting": ["trial"] }
        }));
        assert!(config.gate_access(Gate::ExamMode).is_none());
        assert!(config.gate_access(Gate::TextHighlighting).is_some());
    }

    #[test]
    fn history_toggle() {
        let enabled = CapabilityConfig::from_json(&json!({
            "features_enabled": { "history_view": true, "audio_generation": true }
        }));
        assert!(enabled.is_history_enabled());

        assert!(!CapabilityConfig::from_json(&json!({})).is_history_enabled());
        assert!(!CapabilityConfig::from_json(&json!({
            "features_enabled": { "history_view": "on" }
        }))
        .is_history_enabled());
    }

    #[test]
    fn null_field_is_treated_as_absent() {
        let config = CapabilityConfig::from_json(&json!({
            "topics": null,
            "trial_limit_sessions": null
        }));
        assert!(config.topics.is_empty());
        assert_eq!(config.trial_limit_sessions, DEFAULT_TRIAL_LIMIT);
    }

    #[test]
    fn malformed_topic_entry_is_skipped() {
        let config = CapabilityConfig::from_json(&json!({
            "topics": [{ "description": "no name" }, { "name": "History" }]
        }));
        assert_eq!(config.topics.len(), 1);
        assert_eq!(config.topics[0].name, "History");
    }
}
