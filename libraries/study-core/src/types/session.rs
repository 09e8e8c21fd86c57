/// Generation requests and generated sessions
use crate::types::marker::TimingMarker;
use chrono::{DateTime, Utc};
use serde::de::{DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Request sent to the session provider
///
/// `exam_mode` and `text_highlighting` are only present when the
/// entitlement decision found them available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub topic: String,
    pub prompt: String,
    pub duration_minutes: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_mode: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_highlighting: Option<bool>,
}

/// A generated study session
///
/// Markers are kept raw here; they are validated when the session becomes
/// the playback target so that an out-of-order list only disables
/// highlighting instead of rejecting the session. A `null` or malformed
/// marker list decodes as empty for the same reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    pub id: String,
    pub topic: String,

    /// Narrated text
    pub content: String,

    /// Locator of the audio stream
    #[serde(default, alias = "audio_locator")]
    pub audio_url: Option<String>,

    #[serde(default, alias = "markers", deserialize_with = "lenient")]
    pub speech_marks: Vec<TimingMarker>,

    #[serde(default, deserialize_with = "lenient")]
    pub listen_count: u32,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Decode a field, falling back to its default on `null` or a bad shape
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }

    Ok(serde_json::from_value(value).unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring malformed session field");
        T::default()
    }))
}
