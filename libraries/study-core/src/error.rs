/// Core error types for Study Player
use thiserror::Error;

/// Result type alias using `StudyError`
pub type Result<T> = std::result::Result<T, StudyError>;

/// Core error type for Study Player
///
/// Most of these never escape the core: a malformed config or an
/// out-of-order marker sequence is logged and degraded to the most
/// restrictive behavior instead of being returned to the UI.
#[derive(Error, Debug)]
pub enum StudyError {
    /// A capability config field is absent or has the wrong shape
    #[error("Malformed capability config field `{field}`: {reason}")]
    ConfigMalformed { field: String, reason: String },

    /// A marker sequence decreases in offset
    #[error("Marker {index} at {offset_ms}ms precedes the previous marker at {previous_ms}ms")]
    MarkerOutOfOrder {
        index: usize,
        previous_ms: u64,
        offset_ms: u64,
    },

    /// Requested duration is not part of the deployment's allowed durations
    #[error("Duration not offered: {0} minutes")]
    DurationUnavailable(u32),

    /// Requested duration exists but the plan may not select it
    #[error("{minutes}-minute sessions are locked for the {plan} plan")]
    DurationLocked { minutes: u32, plan: String },

    /// Requested feature is hidden or locked for the plan
    #[error("{feature} is not available on the {plan} plan")]
    FeatureLocked { feature: String, plan: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Config or session provider failure
    #[error("Provider error: {0}")]
    Provider(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

impl StudyError {
    /// Create a malformed config error
    pub fn config_malformed(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigMalformed {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a provider error
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_out_of_order_message() {
        let err = StudyError::MarkerOutOfOrder {
            index: 3,
            previous_ms: 900,
            offset_ms: 400,
        };
        assert_eq!(
            err.to_string(),
            "Marker 3 at 400ms precedes the previous marker at 900ms"
        );
    }

    #[test]
    fn locked_duration_message_names_plan() {
        let err = StudyError::DurationLocked {
            minutes: 10,
            plan: "trial".to_string(),
        };
        assert!(err.to_string().contains("trial"));
        assert!(err.to_string().contains("10-minute"));
    }
}
