//! Study backend client.

use crate::error::{ClientError, Result};
use crate::settings::ClientSettings;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use study_core::{
    CapabilityConfig, ConfigProvider, GenerateRequest, SessionProvider, StudyError, StudySession,
};
use tracing::{debug, info, warn};

/// Client for the study backend.
///
/// Implements both provider traits, so it can be handed to anything that
/// expects a `ConfigProvider` or a `SessionProvider`.
pub struct StudyClient {
    http: Client,
    base_url: String,
    access_token: Option<String>,
}

impl StudyClient {
    /// Create a new client with the given settings.
    pub fn new(settings: ClientSettings) -> Result<Self> {
        settings.validate()?;

        let base_url = settings.base_url.trim_end_matches('/').to_string();

        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .user_agent(format!("StudyPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            access_token: settings.access_token,
        })
    }

    /// Get the normalized base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the capability configuration.
    ///
    /// The body is decoded leniently: malformed fields degrade to deny.
    pub async fn get_config(&self) -> Result<CapabilityConfig> {
        let url = format!("{}/api/v1/study/config", self.base_url);
        debug!(url = %url, "Fetching capability config");

        let response = self.authorize(self.http.get(&url)).send().await?;
        let response = check_status(response).await?;

        let body: serde_json::Value = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse config response: {}", e))
        })?;

        let config = CapabilityConfig::from_json(&body);
        debug!(
            durations = config.allowed_durations.len(),
            topics = config.topics.len(),
            "Fetched capability config"
        );

        Ok(config)
    }

    /// Generate a narrated study session.
    pub async fn generate_session(&self, request: &GenerateRequest) -> Result<StudySession> {
        let url = format!("{}/api/v1/study/generate", self.base_url);
        debug!(
            url = %url,
            topic = %request.topic,
            duration = request.duration_minutes,
            "Requesting study session"
        );

        let response = self
            .authorize(self.http.post(&url).json(request))
            .send()
            .await?;
        let response = check_status(response).await?;

        let session: StudySession = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse session response: {}", e))
        })?;

        info!(
            session_id = %session.id,
            markers = session.speech_marks.len(),
            "Generated study session"
        );

        Ok(session)
    }

    /// List previously generated sessions, newest first.
    pub async fn history(&self) -> Result<Vec<StudySession>> {
        let url = format!("{}/api/v1/study/history", self.base_url);
        debug!(url = %url, "Fetching session history");

        let response = self.authorize(self.http.get(&url)).send().await?;
        let response = check_status(response).await?;

        let sessions: Vec<StudySession> = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("Failed to parse history response: {}", e))
        })?;

        debug!(count = sessions.len(), "Fetched session history");

        Ok(sessions)
    }

    /// Absolute audio URL for a session.
    ///
    /// The backend returns locators relative to its own root.
    pub fn audio_url(&self, session: &StudySession) -> Option<String> {
        let locator = session.audio_url.as_deref()?;
        if url::Url::parse(locator).is_ok() {
            Some(locator.to_string())
        } else {
            Some(format!(
                "{}/{}",
                self.base_url,
                locator.trim_start_matches('/')
            ))
        }
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

/// Map non-success statuses to client errors.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = error_detail(response.text().await.unwrap_or_default());
    warn!(status = status.as_u16(), message = %message, "Request rejected");

    Err(match status {
        StatusCode::UNAUTHORIZED => ClientError::AuthRequired,
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::TOO_MANY_REQUESTS => ClientError::RateLimited(message),
        _ => ClientError::ServerError {
            status: status.as_u16(),
            message,
        },
    })
}

/// Pull `detail` out of a JSON error body, or keep the raw text.
fn error_detail(body: String) -> String {
    serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|value| value.get("detail")?.as_str().map(str::to_string))
        .unwrap_or(body)
}

#[async_trait]
impl ConfigProvider for StudyClient {
    async fn fetch_config(&self) -> study_core::Result<CapabilityConfig> {
        self.get_config().await.map_err(StudyError::from)
    }
}

#[async_trait]
impl SessionProvider for StudyClient {
    async fn generate(&self, request: &GenerateRequest) -> study_core::Result<StudySession> {
        self.generate_session(request)
            .await
            .map_err(StudyError::from)
    }

    async fn history(&self) -> study_core::Result<Vec<StudySession>> {
        StudyClient::history(self).await.map_err(StudyError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_detail_extracts_json_detail() {
        assert_eq!(
            error_detail(r#"{"detail": "Trial limit reached (3 sessions)."}"#.to_string()),
            "Trial limit reached (3 sessions)."
        );
    }

    #[test]
    fn error_detail_keeps_plain_text() {
        assert_eq!(
            error_detail("Internal Server Error".to_string()),
            "Internal Server Error"
        );
        assert_eq!(
            error_detail(r#"{"error": "nope"}"#.to_string()),
            r#"{"error": "nope"}"#
        );
    }

    #[test]
    fn normalizes_trailing_slashes() {
        let client = StudyClient::new(ClientSettings::new("https://example.com///")).unwrap();
        assert_eq!(client.base_url(), "https://example.com");
    }

    #[test]
    fn audio_url_resolves_relative_locator() {
        let client = StudyClient::new(ClientSettings::new("http://localhost:8000/")).unwrap();
        let session = StudySession {
            id: "s1".to_string(),
            topic: "Biology".to_string(),
            content: String::new(),
            audio_url: Some("/api/v1/study/audio/s1".to_string()),
            speech_marks: Vec::new(),
            listen_count: 0,
            created_at: None,
        };

        assert_eq!(
            client.audio_url(&session).as_deref(),
            Some("http://localhost:8000/api/v1/study/audio/s1")
        );

        let absolute = StudySession {
            audio_url: Some("https://cdn.example.com/s1.mp3".to_string()),
            ..session.clone()
        };
        assert_eq!(
            client.audio_url(&absolute).as_deref(),
            Some("https://cdn.example.com/s1.mp3")
        );

        let missing = StudySession {
            audio_url: None,
            ..session
        };
        assert!(client.audio_url(&missing).is_none());
    }
}
