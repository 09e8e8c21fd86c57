//! Topic presets

use study_core::{CapabilityConfig, TopicPreset};

/// Template used for custom topics and presets without one
pub const DEFAULT_PROMPT_TEMPLATE: &str = "Generate a comprehensive study guide about {topic}.";

/// Find a preset by name, ignoring case
pub fn find_topic<'a>(config: &'a CapabilityConfig, name: &str) -> Option<&'a TopicPreset> {
    let name = name.trim();
    config
        .topics
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}

/// Render the base prompt for a topic
///
/// Uses the matching preset's template when there is one.
pub fn render_prompt(config: &CapabilityConfig, topic: &str) -> String {
    let template = find_topic(config, topic)
        .and_then(|preset| preset.prompt_template.as_deref())
        .unwrap_or(DEFAULT_PROMPT_TEMPLATE);

    template.replace("{topic}", topic.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CapabilityConfig {
        CapabilityConfig {
            topics: vec![
                TopicPreset {
                    name: "Organic Chemistry".to_string(),
                    description: Some("Carbon compounds".to_string()),
                    prompt_template: Some("Summarize the key reactions in {topic}.".to_string()),
                },
                TopicPreset {
                    name: "History".to_string(),
                    description: None,
                    prompt_template: None,
                },
            ],
            ..CapabilityConfig::default()
        }
    }

    #[test]
    fn finds_preset_case_insensitively() {
        let config = config();
        let preset = find_topic(&config, "organic chemistry").unwrap();
        assert_eq!(preset.description.as_deref(), Some("Carbon compounds"));
        assert!(find_topic(&config, "Physics").is_none());
    }

    #[test]
    fn renders_preset_template() {
        assert_eq!(
            render_prompt(&config(), "Organic Chemistry"),
            "Summarize the key reactions in Organic Chemistry."
        );
    }

    #[test]
    fn falls_back_to_default_template() {
        let config = config();
        assert_eq!(
            render_prompt(&config, "History"),
            "Generate a comprehensive study guide about History."
        );
        assert_eq!(
            render_prompt(&config, " Quantum Physics "),
            "Generate a comprehensive study guide about Quantum Physics."
        );
    }
}
