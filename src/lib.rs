// Fast Aerial Trainer - jump timing overlay
// Module declarations

pub mod host;
pub mod plugin;
pub mod render;
pub mod settings;
pub mod tracker;

pub use host::{GameHost, HookEvent, PluginHost, VehicleState};
pub use plugin::{PluginError, TrainerPlugin};
pub use render::{Canvas, Color, ColorRange, RecordingCanvas, Vec2};
pub use settings::{SettingsError, TrainerSettings};
pub use tracker::{TimingMetrics, TimingTracker, TrackerEvent, VehicleSample, WindowState};
