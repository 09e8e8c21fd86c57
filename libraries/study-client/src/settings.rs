//! Client settings

use crate::error::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Settings file read by [`ClientSettings::load`]
pub const SETTINGS_FILE: &str = "study-client.toml";

/// Connection settings for the study backend
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientSettings {
    /// Base URL of the backend (e.g. "https://study.example.com")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token issued by the auth flow
    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl ClientSettings {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            access_token: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Load settings from `study-client.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(SETTINGS_FILE))
    }

    /// Load settings from a file (if it exists) and the environment
    ///
    /// Environment variables prefixed with `STUDY_CLIENT_` override the
    /// file, e.g. `STUDY_CLIENT_BASE_URL`, `STUDY_CLIENT_ACCESS_TOKEN`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut settings = config::Config::builder();

        if path.exists() {
            settings = settings.add_source(config::File::from(PathBuf::from(path)));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("STUDY_CLIENT").try_parsing(true),
        );

        let loaded: Self = settings.build()?.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Validate settings
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }

        url::Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        if self.timeout_secs == 0 || self.connect_timeout_secs == 0 {
            return Err(ClientError::Settings(
                "timeouts must be at least one second".into(),
            ));
        }

        Ok(())
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::new(default_base_url())
    }
}

// Default values
fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_connect_timeout_secs() -> u64 {
    10
}
