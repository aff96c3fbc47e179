//! Codec settings persistence.
//!
//! Stores settings in the platform-specific config directory:
//! - Linux/macOS: ~/.config/bodycodec/settings.json
//! - Windows: %APPDATA%/bodycodec/settings.json

use std::path::PathBuf;

use bodycodec_domain::CodecSettings;
use tokio::fs;

use crate::serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};

/// Error type for settings operations.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] SerializationError),

    /// Could not determine config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Repository for codec settings persistence.
#[derive(Debug, Clone, Default)]
pub struct SettingsRepository {
    path: Option<PathBuf>,
}

impl SettingsRepository {
    /// Creates a repository backed by the default settings file.
    #[must_use]
    pub const fn new() -> Self {
        Self { path: None }
    }

    /// Creates a repository backed by an explicit settings file.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// Returns the path to the bodycodec config directory.
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("bodycodec"))
    }

    /// Returns the path to the default settings file.
    fn default_settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.json"))
    }

    /// Returns the settings file this repository reads and writes.
    #[must_use]
    pub fn settings_path(&self) -> Option<PathBuf> {
        self.path.clone().or_else(Self::default_settings_path)
    }

    /// Loads settings from disk.
    ///
    /// Returns default settings if the file doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub async fn load(&self) -> Result<CodecSettings, SettingsError> {
        let Some(path) = self.settings_path() else {
            return Ok(CodecSettings::default());
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(CodecSettings::default());
        }

        let content = fs::read(&path).await?;
        let settings = from_json_bytes(&content)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Saves settings to disk, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if no config directory is available or writing fails.
    pub async fn save(&self, settings: &CodecSettings) -> Result<(), SettingsError> {
        let Some(path) = self.settings_path() else {
            return Err(SettingsError::NoConfigDir);
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let content = to_json_stable_bytes(settings)?;
        fs::write(&path, content).await?;

        Ok(())
    }
}
