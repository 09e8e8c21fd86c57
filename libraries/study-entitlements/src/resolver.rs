//! Entitlement resolution
//!
//! One pure function turns `(CapabilityConfig, Plan)` into an
//! `EntitlementDecision`. All fallback logic lives here so every consumer
//! sees the same defaults.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use study_core::{CapabilityConfig, Gate, GateAccess, Plan};
use tracing::debug;

/// A candidate duration and whether the plan may select it
///
/// Locked durations are kept so the UI can render them disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationOption {
    pub minutes: u32,
    pub locked: bool,
}

/// Visibility and plan access of a toggleable feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureAccess {
    /// Feature exists in this deployment
    pub visible: bool,

    /// Plan is listed in the feature's access set
    pub granted: bool,
}

impl FeatureAccess {
    /// Usable by this plan
    pub fn is_available(&self) -> bool {
        self.visible && self.granted
    }

    /// Shown, but behind a lock indicator
    pub fn is_locked(&self) -> bool {
        self.visible && !self.granted
    }
}

/// Everything the UI needs to gate the session form
///
/// Derived on every config or plan change; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementDecision {
    pub plan: Plan,

    /// Every allowed duration in config order, tagged with its lock state
    pub durations: Vec<DurationOption>,

    pub exam_mode: FeatureAccess,
    pub highlighting: FeatureAccess,
}

impl EntitlementDecision {
    pub fn exam_mode_available(&self) -> bool {
        self.exam_mode.is_available()
    }

    pub fn highlighting_available(&self) -> bool {
        self.highlighting.is_available()
    }

    /// Look up a duration offered by the deployment
    pub fn duration(&self, minutes: u32) -> Option<DurationOption> {
        self.durations.iter().copied().find(|d| d.minutes == minutes)
    }

    /// Duration selected when the user has not chosen one yet
    ///
    /// The first unlocked duration, or the first duration (locked) when
    /// nothing is unlocked. `None` only when no durations are offered.
    pub fn default_duration(&self) -> Option<DurationOption> {
        self.durations
            .iter()
            .copied()
            .find(|d| !d.locked)
            .or_else(|| self.durations.first().copied())
    }

    /// Keep an explicit choice if it is offered, otherwise fall back to the default
    pub fn select_duration(&self, chosen: Option<u32>) -> Option<DurationOption> {
        chosen
            .and_then(|minutes| self.duration(minutes))
            .or_else(|| self.default_duration())
    }

    /// At least one duration is visible but locked (upgrade hint)
    pub fn has_locked_durations(&self) -> bool {
        self.durations.iter().any(|d| d.locked)
    }
}

/// Resolve the entitlements of `plan` under `config`
///
/// Never fails. A gate absent from `plan_access`, or present with the wrong
/// shape, grants only the `paid` plan.
pub fn resolve(config: &CapabilityConfig, plan: &Plan) -> EntitlementDecision {
    let durations: Vec<DurationOption> = config
        .allowed_durations
        .iter()
        .map(|&minutes| DurationOption {
            minutes,
            locked: !grants(duration_access(config, minutes), plan),
        })
        .collect();

    let exam_mode = feature_access(config, Gate::ExamMode, plan);
    let highlighting = feature_access(config, Gate::TextHighlighting, plan);

    debug!(
        plan = %plan,
        durations = durations.len(),
        locked = durations.iter().filter(|d| d.locked).count(),
        exam_mode = exam_mode.is_available(),
        highlighting = highlighting.is_available(),
        "Resolved entitlements"
    );

    EntitlementDecision {
        plan: plan.clone(),
        durations,
        exam_mode,
        highlighting,
    }
}

/// Membership test with the `{"paid"}` default for missing access sets
fn grants(access: Option<&BTreeSet<String>>, plan: &Plan) -> bool {
    match access {
        Some(plans) => plan.is_member_of(plans),
        None => *plan == Plan::Paid,
    }
}

fn duration_access(config: &CapabilityConfig, minutes: u32) -> Option<&BTreeSet<String>> {
    match config.gate_access(Gate::Durations)? {
        GateAccess::PerOption(per_duration) => per_duration.get(&minutes.to_string()),
        // A flat list applies to every duration
        GateAccess::Plans(plans) => Some(plans),
    }
}

fn feature_access(config: &CapabilityConfig, gate: Gate, plan: &Plan) -> FeatureAccess {
    let access = match config.gate_access(gate) {
        Some(GateAccess::Plans(plans)) => Some(plans),
        Some(GateAccess::PerOption(_)) | None => None,
    };

    FeatureAccess {
        visible: config.is_feature_enabled(gate),
        granted: grants(access, plan),
    }
}
