// Pitch intensity trace
// Rolling line plot of tilt intensity samples recorded during the double jump window

use crate::render::canvas::{Canvas, Color, Vec2};

const FRAME_COLOR: Color = Color::rgba(255, 255, 255, 127);

/// Placement of the trace box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceStyle {
    /// Top-left corner of the plot area
    pub origin: Vec2,

    /// Plot area size; full intensity sits at the top edge
    pub size: Vec2,

    /// Gap between the plot area and its frame
    pub padding: f32,

    pub line_width: f32,
}

/// Plot-space point for sample `index` out of `count`
fn plot_point(index: usize, count: usize, intensity: f32, size: Vec2) -> Vec2 {
    Vec2::new(
        index as f32 / count as f32 * size.x,
        (1.0 - intensity) * size.y,
    )
}

/// Line segments between consecutive samples, relative to the plot origin
/// Segments touching a negative sample are left out, so forward tilt shows as a gap
pub fn trace_segments(samples: &[f32], size: Vec2) -> Vec<(Vec2, Vec2)> {
    let count = samples.len();
    samples
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0] >= 0.0 && pair[1] >= 0.0)
        .map(|(i, pair)| {
            (
                plot_point(i, count, pair[0], size),
                plot_point(i + 1, count, pair[1], size),
            )
        })
        .collect()
}

/// Draw the frame and the intensity trace
pub fn draw_pitch_trace(canvas: &mut impl Canvas, samples: &[f32], style: &TraceStyle) {
    canvas.set_color(FRAME_COLOR);
    canvas.set_position(style.origin - style.padding);
    canvas.draw_box(style.size + 2.0 * style.padding);

    canvas.set_color(Color::WHITE);
    for (start, end) in trace_segments(samples, style.size) {
        canvas.draw_line(start + style.origin, end + style.origin, style.line_width);
    }
}
