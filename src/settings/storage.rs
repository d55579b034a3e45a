// Settings persistence
// Reads and writes overlay settings as pretty-printed JSON
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::settings::types::{TrainerSettings, SETTINGS_VERSION};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to get config directory")]
    NoConfigDir,
    #[error("Invalid settings: {0}")]
    Invalid(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;

const SETTINGS_FILE: &str = "settings.json";

/// Get the default settings file location for the trainer
pub fn default_settings_path() -> SettingsResult<PathBuf> {
    let config_dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
    Ok(config_dir.join("fast-aerial-trainer").join(SETTINGS_FILE))
}

/// Load and validate settings from a JSON file
pub fn load_settings(path: &Path) -> SettingsResult<TrainerSettings> {
    let contents = fs::read_to_string(path)?;
    let settings: TrainerSettings = serde_json::from_str(&contents)?;
    settings.validate()?;
    log::info!("Loaded overlay settings from {}", path.display());
    Ok(settings)
}

/// Load settings, falling back to defaults when the file is missing or bad
pub fn load_or_default(path: &Path) -> TrainerSettings {
    if !path.exists() {
        log::info!("No settings at {}, using defaults", path.display());
        return TrainerSettings::default();
    }
    match load_settings(path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Ignoring settings at {}: {}", path.display(), e);
            TrainerSettings::default()
        }
    }
}

/// Validate and write settings, creating parent directories as needed
/// Returns the settings as written, with version and save time stamped
pub fn save_settings(path: &Path, settings: &TrainerSettings) -> SettingsResult<TrainerSettings> {
    settings.validate()?;

    let mut stamped = settings.clone();
    stamped.version = SETTINGS_VERSION;
    stamped.saved_at = Some(chrono::Utc::now().to_rfc3339());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&stamped)?;
    fs::write(path, json)?;

    log::info!("Saved overlay settings to {}", path.display());
    Ok(stamped)
}
