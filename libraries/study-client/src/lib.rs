//! Study Player Server Client
//!
//! HTTP implementations of the config provider and the session provider.
//!
//! # Features
//!
//! - **Settings**: base URL, token and timeouts from `study-client.toml`
//!   and `STUDY_CLIENT_*` environment variables
//! - **Config**: fetches and leniently decodes the capability configuration
//! - **Sessions**: requests narrated study sessions and lists past ones
//!
//! # Example
//!
//! ```ignore
//! use study_client::{ClientSettings, StudyClient};
//! use study_core::Plan;
//! use study_entitlements::{resolve, GenerationForm};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let settings = ClientSettings::load()?;
//!     let client = StudyClient::new(settings)?;
//!
//!     let config = client.get_config().await?;
//!     let decision = resolve(&config, &Plan::Trial);
//!
//!     let request = GenerationForm::new("Biology", "Explain mitosis").build(&decision)?;
//!     let session = client.generate_session(&request).await?;
//!     println!("Generated {} ({} markers)", session.id, session.speech_marks.len());
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod settings;

// Re-export main types
pub use client::StudyClient;
pub use error::{ClientError, Result};
pub use settings::{ClientSettings, SETTINGS_FILE};
