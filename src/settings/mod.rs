// Settings module
// Overlay configuration and its JSON persistence

pub mod storage;
pub mod types;

pub use storage::{
    default_settings_path, load_or_default, load_settings, save_settings, SettingsError,
    SettingsResult,
};
pub use types::{TrainerSettings, SETTINGS_VERSION};
