//! Upload manager configuration.
//!
//! Loaded from a `formkit.toml` alongside the host installation, or built
//! programmatically. The server secret salts the secret-directory
//! derivation: it must stay stable for the life of the installation and
//! never be exposed externally.

use crate::error::UploadError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

const DEFAULT_FALLBACK_DELAY_SECS: u64 = 3600;

/// Settings for the private upload manager.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Root directory the host stores uploads under.
    pub upload_root: PathBuf,
    /// Public URL prefix mapping to `upload_root`.
    pub base_url: String,
    /// Installation-wide salt for secret-directory names.
    pub server_secret: String,
    /// Delay before the fallback purge fires for a private upload.
    pub fallback_delay_secs: u64,
    /// Field types whose uploads are isolated into secret directories.
    pub private_field_types: Vec<String>,
}

impl UploadConfig {
    pub fn new(
        upload_root: impl Into<PathBuf>,
        base_url: impl Into<String>,
        server_secret: impl Into<String>,
    ) -> Result<Self, UploadError> {
        let server_secret = server_secret.into();
        if server_secret.is_empty() {
            return Err(UploadError::Config("server secret must not be empty".into()));
        }
        Ok(Self {
            upload_root: upload_root.into(),
            base_url: base_url.into(),
            server_secret,
            fallback_delay_secs: DEFAULT_FALLBACK_DELAY_SECS,
            private_field_types: default_private_types(),
        })
    }

    /// Loads configuration from a TOML file.
    ///
    /// `upload_root`, `base_url` and `server_secret` are required; the
    /// fallback delay and the isolating type set default when absent.
    pub fn load_from(path: &Path) -> Result<Self, UploadError> {
        let contents = std::fs::read_to_string(path)?;
        let file: ConfigFile = toml::from_str(&contents)?;
        let uploads = file.uploads;

        if uploads.server_secret.is_empty() {
            return Err(UploadError::Config(format!(
                "{} is missing uploads.server_secret",
                path.display()
            )));
        }

        info!(path = %path.display(), "loaded upload configuration");
        Ok(Self {
            upload_root: uploads.upload_root,
            base_url: uploads.base_url,
            server_secret: uploads.server_secret,
            fallback_delay_secs: uploads.fallback_delay_secs,
            private_field_types: uploads.private_field_types,
        })
    }

    /// Fallback purge delay as a `Duration`.
    #[must_use]
    pub fn fallback_delay(&self) -> Duration {
        Duration::from_secs(self.fallback_delay_secs)
    }

    /// Whether a field type's uploads are isolated into secret dirs.
    pub fn is_private_type(&self, type_key: &str) -> bool {
        self.private_field_types.iter().any(|t| t == type_key)
    }
}

fn default_private_types() -> Vec<String> {
    vec!["advanced_file".to_string()]
}

fn default_fallback_delay() -> u64 {
    DEFAULT_FALLBACK_DELAY_SECS
}

/// Raw TOML structure matching the `formkit.toml` format.
#[derive(Deserialize)]
struct ConfigFile {
    uploads: UploadsSection,
}

#[derive(Deserialize)]
struct UploadsSection {
    upload_root: PathBuf,
    base_url: String,
    #[serde(default)]
    server_secret: String,
    #[serde(default = "default_fallback_delay")]
    fallback_delay_secs: u64,
    #[serde(default = "default_private_types")]
    private_field_types: Vec<String>,
}
