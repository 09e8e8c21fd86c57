//! Trial session allowance

use study_core::{CapabilityConfig, Plan};

/// Sessions the plan may still generate
///
/// `None` means unlimited (paid). Trial accounts get
/// `trial_limit_sessions` in total; unknown plans get nothing.
pub fn sessions_remaining(config: &CapabilityConfig, plan: &Plan, used: u32) -> Option<u32> {
    match plan {
        Plan::Paid => None,
        Plan::Trial => Some(config.trial_limit_sessions.saturating_sub(used)),
        Plan::Unknown(_) => Some(0),
    }
}

/// Whether another session may be generated
pub fn can_generate(config: &CapabilityConfig, plan: &Plan, used: u32) -> bool {
    sessions_remaining(config, plan, used) != Some(0)
}
