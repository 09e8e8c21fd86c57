//! Session generation form
//!
//! Collects what the user picked and turns it into a `GenerateRequest`,
//! refusing anything the entitlement decision does not allow.

use crate::resolver::{EntitlementDecision, FeatureAccess};
use study_core::{Gate, GenerateRequest, Result, StudyError};
use tracing::debug;

/// User input for a new study session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationForm {
    pub topic: String,
    pub prompt: String,

    /// Explicitly chosen duration; `None` uses the default selection
    pub duration_minutes: Option<u32>,

    pub exam_mode: bool,
    pub text_highlighting: bool,
}

impl GenerationForm {
    pub fn new(topic: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    #[must_use]
    pub fn with_exam_mode(mut self, enabled: bool) -> Self {
        self.exam_mode = enabled;
        self
    }

    #[must_use]
    pub fn with_text_highlighting(mut self, enabled: bool) -> Self {
        self.text_highlighting = enabled;
        self
    }

    /// Build the request for the session provider
    ///
    /// Feature flags are only included when the decision reports the
    /// feature available; asking for an unavailable feature is an error.
    pub fn build(&self, decision: &EntitlementDecision) -> Result<GenerateRequest> {
        let topic = self.topic.trim();
        if topic.is_empty() {
            return Err(StudyError::invalid_input("topic is required"));
        }

        let prompt = self.prompt.trim();
        if prompt.is_empty() {
            return Err(StudyError::invalid_input("prompt is required"));
        }

        let duration = match self.duration_minutes {
            Some(minutes) => decision
                .duration(minutes)
                .ok_or(StudyError::DurationUnavailable(minutes))?,
            None => decision
                .default_duration()
                .ok_or_else(|| StudyError::invalid_input("no session durations are offered"))?,
        };

        if duration.locked {
            return Err(StudyError::DurationLocked {
                minutes: duration.minutes,
                plan: decision.plan.to_string(),
            });
        }

        let request = GenerateRequest {
            topic: topic.to_string(),
            prompt: prompt.to_string(),
            duration_minutes: duration.minutes,
            exam_mode: gated_flag(decision, Gate::ExamMode, decision.exam_mode, self.exam_mode)?,
            text_highlighting: gated_flag(
                decision,
                Gate::TextHighlighting,
                decision.highlighting,
                self.text_highlighting,
            )?,
        };

        debug!(
            topic = %request.topic,
            duration = request.duration_minutes,
            exam_mode = ?request.exam_mode,
            text_highlighting = ?request.text_highlighting,
            "Built generation request"
        );

        Ok(request)
    }
}

fn gated_flag(
    decision: &EntitlementDecision,
    gate: Gate,
    access: FeatureAccess,
    requested: bool,
) -> Result<Option<bool>> {
    match (access.is_available(), requested) {
        (true, requested) => Ok(Some(requested)),
        (false, false) => Ok(None),
        (false, true) => Err(StudyError::FeatureLocked {
            feature: gate.key().to_string(),
            plan: decision.plan.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;
    use serde_json::json;
    use study_core::{CapabilityConfig, Plan};

    fn decision(plan: Plan) -> EntitlementDecision {
        let config = CapabilityConfig::from_json(&json!({
            "features_enabled": { "exam_mode": true, "text_highlighting": true },
            "allowed_durations": [3, 5, 10],
            "plan_access": {
                "durations": { "3": ["trial", "paid"], "5": ["paid"], "10": ["paid"] },
                "exam_mode": ["trial", "paid"],
                "text_highlighting": ["paid"]
            }
        }));
        resolve(&config, &plan)
    }

    #[test]
    fn builds_with_default_duration() {
        let request = GenerationForm::new("Biology", "Explain mitosis")
            .build(&decision(Plan::Trial))
            .unwrap();

        assert_eq!(request.duration_minutes, 3);
        assert_eq!(request.exam_mode, Some(false));
        // Not available to trial, so not sent at all
        assert_eq!(request.text_highlighting, None);
    }

    #[test]
    fn trims_topic_and_prompt() {
        let request = GenerationForm::new("  Biology ", "\n Explain mitosis \t")
            .build(&decision(Plan::Paid))
            .unwrap();

        assert_eq!(request.topic, "Biology");
        assert_eq!(request.prompt, "Explain mitosis");
    }

    #[test]
    fn rejects_empty_prompt() {
        let err = GenerationForm::new("Biology", "   ")
            .build(&decision(Plan::Paid))
            .unwrap_err();
        assert!(matches!(err, StudyError::InvalidInput(_)));
    }

    #[test]
    fn rejects_empty_topic() {
        let err = GenerationForm::new("", "Explain mitosis")
            .build(&decision(Plan::Paid))
            .unwrap_err();
        assert!(matches!(err, StudyError::InvalidInput(_)));
    }

    #[test]
    fn rejects_locked_duration() {
        let err = GenerationForm::new("Biology", "Explain mitosis")
            .with_duration(10)
            .build(&decision(Plan::Trial))
            .unwrap_err();

        assert!(matches!(
            err,
            StudyError::DurationLocked { minutes: 10, .. }
        ));
    }

    #[test]
    fn rejects_duration_not_offered() {
        let err = GenerationForm::new("Biology", "Explain mitosis")
            .with_duration(7)
            .build(&decision(Plan::Paid))
            .unwrap_err();

        assert!(matches!(err, StudyError::DurationUnavailable(7)));
    }

    #[test]
    fn rejects_locked_feature_request() {
        let err = GenerationForm::new("Biology", "Explain mitosis")
            .with_text_highlighting(true)
            .build(&decision(Plan::Trial))
            .unwrap_err();

        match err {
            StudyError::FeatureLocked { feature, plan } => {
                assert_eq!(feature, "text_highlighting");
                assert_eq!(plan, "trial");
            }
            other => panic!("Expected FeatureLocked, got {other:?}"),
        }
    }

    #[test]
    fn paid_plan_sends_both_flags() {
        let request = GenerationForm::new("Biology", "Explain mitosis")
            .with_duration(10)
            .with_exam_mode(true)
            .with_text_highlighting(true)
            .build(&decision(Plan::Paid))
            .unwrap();

        assert_eq!(request.duration_minutes, 10);
        assert_eq!(request.exam_mode, Some(true));
        assert_eq!(request.text_highlighting, Some(true));
    }

    #[test]
    fn no_durations_offered_is_invalid() {
        let decision = resolve(&CapabilityConfig::default(), &Plan::Paid);
        let err = GenerationForm::new("Biology", "Explain mitosis")
            .build(&decision)
            .unwrap_err();
        assert!(matches!(err, StudyError::InvalidInput(_)));
    }
}
