/// Subscription plan types
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A user's subscription tier
///
/// Unknown identifiers are preserved verbatim but never match an access
/// set, so an unrecognized plan resolves as fully locked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Plan {
    Trial,
    Paid,
    Unknown(String),
}

impl Plan {
    /// Wire identifier of the plan
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Trial => "trial",
            Self::Paid => "paid",
            Self::Unknown(id) => id,
        }
    }

    /// Whether this plan is listed in an access set
    pub fn is_member_of(&self, access: &BTreeSet<String>) -> bool {
        match self {
            Self::Unknown(_) => false,
            known => access.contains(known.as_str()),
        }
    }
}

impl From<&str> for Plan {
    fn from(s: &str) -> Self {
        match s {
            "trial" => Self::Trial,
            "paid" => Self::Paid,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl From<String> for Plan {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<Plan> for String {
    fn from(plan: Plan) -> Self {
        plan.as_str().to_string()
    }
}

impl std::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn access(plans: &[&str]) -> BTreeSet<String> {
        plans.iter().map(|p| (*p).to_string()).collect()
    }

    #[test]
    fn parses_known_plans() {
        assert_eq!(Plan::from("trial"), Plan::Trial);
        assert_eq!(Plan::from("paid"), Plan::Paid);
        assert_eq!(Plan::from("enterprise"), Plan::Unknown("enterprise".into()));
    }

    #[test]
    fn serde_uses_wire_string() {
        let json = serde_json::to_string(&Plan::Paid).unwrap();
        assert_eq!(json, "\"paid\"");

        let plan: Plan = serde_json::from_str("\"family\"").unwrap();
        assert_eq!(plan.as_str(), "family");
    }

    #[test]
    fn unknown_plan_never_matches() {
        let plan = Plan::from("enterprise");
        assert!(!plan.is_member_of(&access(&["enterprise", "paid"])));
    }

    #[test]
    fn known_plan_membership() {
        assert!(Plan::Trial.is_member_of(&access(&["trial", "paid"])));
        assert!(!Plan::Trial.is_member_of(&access(&["paid"])));
    }
}
