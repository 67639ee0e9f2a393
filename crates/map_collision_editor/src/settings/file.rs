//! Settings file save/load operations

use super::EditorSettings;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

const SETTINGS_FILE: &str = "collision_settings.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Serialize error: {0}")]
    SerializeError(String),
    #[error("Could not determine config directory")]
    NoConfigDir,
}

impl EditorSettings {
    /// Get the config directory path for the editor
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "map_collision_editor", "map_collision_editor")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(SETTINGS_FILE))
    }

    /// Load settings from the config directory, returning defaults on any failure
    pub fn load() -> Self {
        let result = Self::settings_path()
            .ok_or(SettingsError::NoConfigDir)
            .and_then(|path| Self::load_from(&path));
        match result {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Could not load collision settings: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Load settings from a file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| SettingsError::IoError(e.to_string()))?;

        serde_json::from_str(&content).map_err(|e| SettingsError::ParseError(e.to_string()))
    }

    /// Save settings to the config directory
    pub fn save(&self) -> Result<(), SettingsError> {
        let dir = Self::config_dir().ok_or(SettingsError::NoConfigDir)?;

        // Create config directory if it doesn't exist
        std::fs::create_dir_all(&dir).map_err(|e| SettingsError::IoError(e.to_string()))?;

        self.save_to(&dir.join(SETTINGS_FILE))
    }

    /// Save settings to a file
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| SettingsError::SerializeError(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| SettingsError::IoError(e.to_string()))?;

        info!("Saved collision settings to {:?}", path);
        Ok(())
    }
}
