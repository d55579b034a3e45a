// Overlay settings
// Placement, colors and threshold ranges for the timing gauges

use serde::{Deserialize, Serialize};

use crate::render::canvas::{Color, Vec2};
use crate::render::gauge::{BarStyle, ColorRange};
use crate::render::trace::TraceStyle;
use crate::settings::storage::{SettingsError, SettingsResult};

/// Current settings file version
pub const SETTINGS_VERSION: u32 = 1;

const RED: Color = Color::rgba(255, 0, 0, 255);
const YELLOW: Color = Color::rgba(255, 255, 0, 255);
const GREEN: Color = Color::rgba(0, 255, 0, 255);

/// User-tunable overlay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerSettings {
    /// Settings format version for future compatibility
    pub version: u32,

    /// Last save timestamp (ISO 8601)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<String>,

    /// Top-left corner of the overlay in screen pixels
    pub gui_position: Vec2,

    /// Overlay width in pixels; every other dimension scales from it
    pub gui_size: f32,

    pub background_color: Color,

    /// Alpha multiplier for range previews [0.0, 1.0]
    pub preview_opacity: f32,

    /// Draw the pitch intensity trace below the gauges
    pub draw_pitch_history: bool,

    /// Full-scale value of the hold bar (ms)
    pub jump_duration_max_ms: f32,

    pub jump_duration_ranges: Vec<ColorRange>,

    /// Full-scale value of the gap bar (ms)
    pub double_jump_duration_max_ms: f32,

    pub double_jump_duration_ranges: Vec<ColorRange>,
}

impl Default for TrainerSettings {
    fn default() -> Self {
        TrainerSettings {
            version: SETTINGS_VERSION,
            saved_at: None,
            gui_position: Vec2::new(100.0, 100.0),
            gui_size: 500.0,
            background_color: Color::rgba(0, 0, 0, 150),
            preview_opacity: 0.3,
            draw_pitch_history: true,
            jump_duration_max_ms: 300.0,
            jump_duration_ranges: vec![
                ColorRange::new(0.0, 180.0, RED),
                ColorRange::new(180.0, 195.0, YELLOW),
                ColorRange::new(195.0, 225.0, GREEN),
                ColorRange::new(225.0, 250.0, YELLOW),
                ColorRange::new(250.0, 300.0, RED),
            ],
            double_jump_duration_max_ms: 300.0,
            double_jump_duration_ranges: vec![
                ColorRange::new(0.0, 50.0, GREEN),
                ColorRange::new(50.0, 80.0, YELLOW),
                ColorRange::new(80.0, 300.0, RED),
            ],
        }
    }
}

impl TrainerSettings {
    /// Size of each metric bar
    pub fn bar_size(&self) -> Vec2 {
        Vec2::new(self.gui_size, self.gui_size / 20.0).trunc()
    }

    /// Vertical step between overlay rows
    pub fn offset(&self) -> Vec2 {
        Vec2::new(0.0, self.gui_size / 10.0).trunc()
    }

    pub fn font_scale(&self) -> f32 {
        self.gui_size / 400.0
    }

    fn bar_style(&self, position: Vec2) -> BarStyle {
        BarStyle {
            position,
            size: self.bar_size(),
            background: self.background_color,
            preview_opacity: self.preview_opacity,
            font_scale: self.font_scale(),
        }
    }

    /// First row: first jump hold duration
    pub fn hold_bar_style(&self) -> BarStyle {
        self.bar_style(self.gui_position)
    }

    /// Second row: time between jumps
    pub fn gap_bar_style(&self) -> BarStyle {
        self.bar_style(self.gui_position + self.offset())
    }

    /// Third row: tilt percentage text
    pub fn tilt_text_position(&self) -> Vec2 {
        self.gui_position + self.offset() * 2.0
    }

    /// Pitch trace below the text row
    pub fn trace_style(&self) -> TraceStyle {
        TraceStyle {
            origin: self.offset() * 2.6 + self.gui_position,
            size: Vec2::new(self.gui_size, self.gui_size / 10.0).trunc(),
            padding: self.gui_size / 200.0,
            line_width: self.gui_size / 500.0,
        }
    }

    /// Check that the settings produce sane geometry
    pub fn validate(&self) -> SettingsResult<()> {
        if !(self.gui_size.is_finite() && self.gui_size > 0.0) {
            return Err(SettingsError::Invalid(format!(
                "gui_size must be positive, got {}",
                self.gui_size
            )));
        }
        if !(0.0..=1.0).contains(&self.preview_opacity) {
            return Err(SettingsError::Invalid(format!(
                "preview_opacity must be within [0, 1], got {}",
                self.preview_opacity
            )));
        }

        let bars = [
            ("jump_duration", self.jump_duration_max_ms, &self.jump_duration_ranges),
            (
                "double_jump_duration",
                self.double_jump_duration_max_ms,
                &self.double_jump_duration_ranges,
            ),
        ];
        for (name, max_ms, ranges) in bars {
            if !(max_ms.is_finite() && max_ms > 0.0) {
                return Err(SettingsError::Invalid(format!(
                    "{}_max_ms must be positive, got {}",
                    name, max_ms
                )));
            }
            if let Some(range) = ranges.iter().find(|r| !(r.min <= r.max)) {
                return Err(SettingsError::Invalid(format!(
                    "{} range has min {} above max {}",
                    name, range.min, range.max
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(TrainerSettings::default().validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        let settings = TrainerSettings::default();
        assert_eq!(settings.version, SETTINGS_VERSION);
        assert_eq!(settings.gui_position, Vec2::new(100.0, 100.0));
        assert_eq!(settings.gui_size, 500.0);
        assert_eq!(settings.preview_opacity, 0.3);
        assert!(settings.draw_pitch_history);
        assert_eq!(settings.jump_duration_max_ms, 300.0);
        assert_eq!(settings.double_jump_duration_max_ms, 300.0);

        // Ranges span the full bar
        let last_hold = settings.jump_duration_ranges.last().unwrap();
        assert_eq!(last_hold.max, settings.jump_duration_max_ms);
        let last_gap = settings.double_jump_duration_ranges.last().unwrap();
        assert_eq!(last_gap.max, settings.double_jump_duration_max_ms);
    }

    #[test]
    fn test_geometry_scales_with_gui_size() {
        let settings = TrainerSettings {
            gui_position: Vec2::new(10.0, 10.0),
            gui_size: 400.0,
            ..TrainerSettings::default()
        };

        assert_eq!(settings.bar_size(), Vec2::new(400.0, 20.0));
        assert_eq!(settings.offset(), Vec2::new(0.0, 40.0));
        assert_eq!(settings.font_scale(), 1.0);
        assert_eq!(settings.gap_bar_style().position, Vec2::new(10.0, 50.0));
        assert_eq!(settings.tilt_text_position(), Vec2::new(10.0, 90.0));

        let trace = settings.trace_style();
        assert_eq!(trace.origin.x, 10.0);
        assert!((trace.origin.y - 114.0).abs() < 1e-3);
        assert_eq!(trace.size, Vec2::new(400.0, 40.0));
        assert_eq!(trace.padding, 2.0);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_size = TrainerSettings {
            gui_size: 0.0,
            ..TrainerSettings::default()
        };
        assert!(matches!(bad_size.validate(), Err(SettingsError::Invalid(_))));

        let bad_opacity = TrainerSettings {
            preview_opacity: 1.5,
            ..TrainerSettings::default()
        };
        assert!(bad_opacity.validate().is_err());

        let bad_max = TrainerSettings {
            double_jump_duration_max_ms: -1.0,
            ..TrainerSettings::default()
        };
        assert!(bad_max.validate().is_err());

        let bad_range = TrainerSettings {
            jump_duration_ranges: vec![ColorRange::new(200.0, 100.0, GREEN)],
            ..TrainerSettings::default()
        };
        assert!(bad_range.validate().is_err());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let parsed: TrainerSettings =
            serde_json::from_str(r#"{ "gui_size": 800.0, "draw_pitch_history": false }"#).unwrap();
        assert_eq!(parsed.gui_size, 800.0);
        assert!(!parsed.draw_pitch_history);
        assert_eq!(parsed.jump_duration_ranges.len(), 5);
        assert_eq!(parsed.version, SETTINGS_VERSION);
    }
}
