/// Provider traits for Study Player
///
/// The core never performs network or storage calls itself. Whatever
/// delivers the capability configuration and the generated sessions plugs
/// in behind these two seams (HTTP in `study-client`, fakes in tests).
use crate::error::Result;
use crate::types::{CapabilityConfig, GenerateRequest, StudySession};
use async_trait::async_trait;

/// Source of the deployment's capability configuration
#[async_trait]
pub trait ConfigProvider: Send + Sync {
    /// Fetch the current capability configuration
    ///
    /// Implementations should decode leniently (see
    /// [`CapabilityConfig::from_json`]) so a malformed field degrades to
    /// deny rather than failing the whole fetch.
    async fn fetch_config(&self) -> Result<CapabilityConfig>;
}

/// Generator of narrated study sessions
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Generate a session: narrated text, audio locator and timing markers
    async fn generate(&self, request: &GenerateRequest) -> Result<StudySession>;

    /// Previously generated sessions, newest first
    async fn history(&self) -> Result<Vec<StudySession>>;
}
