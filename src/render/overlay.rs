// Per-frame overlay
// Paints both timing bars, the tilt readout and the optional pitch trace

use crate::render::canvas::{Canvas, Color};
use crate::render::gauge::draw_metric_bar;
use crate::render::trace::draw_pitch_trace;
use crate::settings::TrainerSettings;
use crate::tracker::{tilt_percentage, TimingMetrics, TimingTracker};

pub const HOLD_LABEL: &str = "Hold First Jump in ms: ";
pub const GAP_LABEL: &str = "Time to Double Jump in ms: ";

/// Read-only view of the tracker for one frame
#[derive(Debug, Clone, Copy)]
pub struct OverlayFrame<'a> {
    pub metrics: TimingMetrics,
    pub accumulated_tilt: f32,
    pub total_jump_span: f32,
    pub pitch_samples: &'a [f32],
}

impl<'a> OverlayFrame<'a> {
    pub fn from_tracker(tracker: &'a TimingTracker) -> Self {
        OverlayFrame {
            metrics: tracker.metrics(),
            accumulated_tilt: tracker.accumulated_tilt(),
            total_jump_span: tracker.total_jump_span(),
            pitch_samples: tracker.pitch_samples(),
        }
    }
}

pub fn tilt_label(percentage: f32) -> String {
    format!("Tilt Between Jumps: {:.1}%", percentage)
}

/// Paint the whole overlay for one frame
pub fn draw_overlay(canvas: &mut impl Canvas, frame: &OverlayFrame<'_>, settings: &TrainerSettings) {
    draw_metric_bar(
        canvas,
        HOLD_LABEL,
        frame.metrics.hold_first_jump * 1000.0,
        settings.jump_duration_max_ms,
        &settings.hold_bar_style(),
        &settings.jump_duration_ranges,
    );

    draw_metric_bar(
        canvas,
        GAP_LABEL,
        frame.metrics.time_between_jumps * 1000.0,
        settings.double_jump_duration_max_ms,
        &settings.gap_bar_style(),
        &settings.double_jump_duration_ranges,
    );

    canvas.set_color(Color::WHITE);
    canvas.set_position(settings.tilt_text_position());
    let percentage = tilt_percentage(frame.accumulated_tilt, frame.total_jump_span);
    canvas.draw_string(
        &tilt_label(percentage),
        settings.font_scale(),
        settings.font_scale(),
    );

    if settings.draw_pitch_history {
        draw_pitch_trace(canvas, frame.pitch_samples, &settings.trace_style());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::canvas::{DrawCommand, RecordingCanvas};

    fn frame(samples: &[f32]) -> OverlayFrame<'_> {
        OverlayFrame {
            metrics: TimingMetrics {
                hold_first_jump: 0.2,
                time_between_jumps: 0.05,
            },
            accumulated_tilt: 2.0,
            total_jump_span: 4.0,
            pitch_samples: samples,
        }
    }

    #[test]
    fn test_tilt_label() {
        assert_eq!(tilt_label(50.0), "Tilt Between Jumps: 50.0%");
        assert_eq!(tilt_label(0.0), "Tilt Between Jumps: 0.0%");
    }

    #[test]
    fn test_overlay_text_rows() {
        let mut canvas = RecordingCanvas::new();
        let samples = [0.5, 0.7];
        draw_overlay(&mut canvas, &frame(&samples), &TrainerSettings::default());

        let texts = canvas.texts();
        assert_eq!(texts.len(), 3);
        assert!(texts[0].starts_with(HOLD_LABEL));
        assert!(texts[1].starts_with(GAP_LABEL));
        assert_eq!(texts[2], "Tilt Between Jumps: 50.0%");
        assert_eq!(canvas.lines().count(), 1);
    }

    #[test]
    fn test_gap_bar_sits_one_offset_below() {
        let settings = TrainerSettings::default();
        let mut canvas = RecordingCanvas::new();
        draw_overlay(&mut canvas, &frame(&[]), &settings);

        let backgrounds: Vec<_> = canvas
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillBox { position, size, color } if *color == settings.background_color => {
                    Some((*position, *size))
                }
                _ => None,
            })
            .collect();
        assert_eq!(backgrounds.len(), 2);
        assert_eq!(backgrounds[0].0, settings.gui_position);
        assert_eq!(backgrounds[1].0, settings.gui_position + settings.offset());
    }

    #[test]
    fn test_trace_toggle() {
        let settings = TrainerSettings {
            draw_pitch_history: false,
            ..TrainerSettings::default()
        };
        let samples = [0.5, 0.7, 0.9];
        let mut canvas = RecordingCanvas::new();
        draw_overlay(&mut canvas, &frame(&samples), &settings);
        assert_eq!(canvas.lines().count(), 0);
    }

    #[test]
    fn test_negative_metrics_render_empty_bars() {
        let mut canvas = RecordingCanvas::new();
        let mut negative = frame(&[]);
        negative.metrics.hold_first_jump = -0.5;
        draw_overlay(&mut canvas, &negative, &TrainerSettings::default());

        for command in canvas.fills() {
            if let DrawCommand::FillBox { size, .. } = command {
                assert!(size.x >= 0.0);
            }
        }
    }
}
