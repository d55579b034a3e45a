// Threshold-colored bar gauge
// Draws a metric as a filled bar with colored "good zone" previews and boundary ticks

use serde::{Deserialize, Serialize};

use crate::render::canvas::{Canvas, Color, Vec2};

/// Width of the boundary tick marks in pixels
pub const TICK_WIDTH_PX: f32 = 2.0;

/// A colored band over a metric's domain, inclusive at both ends
/// Ranges may overlap or leave gaps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorRange {
    pub min: f32,
    pub max: f32,
    pub color: Color,
}

impl ColorRange {
    pub const fn new(min: f32, max: f32, color: Color) -> Self {
        ColorRange { min, max, color }
    }

    pub fn contains(&self, value: f32) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Placement and look of a bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarStyle {
    pub position: Vec2,
    pub size: Vec2,
    pub background: Color,

    /// Alpha multiplier for range previews [0.0, 1.0]
    pub preview_opacity: f32,

    pub font_scale: f32,
}

/// `value / max_value` clamped to [0, 1]
/// Zero or non-finite denominators give 0 so nothing non-finite reaches the canvas
pub fn fill_fraction(value: f32, max_value: f32) -> f32 {
    if max_value <= 0.0 || !max_value.is_finite() {
        return 0.0;
    }
    let ratio = value / max_value;
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Color of the solid fill: the last range containing `value`
pub fn fill_color(value: f32, ranges: &[ColorRange]) -> Option<Color> {
    ranges
        .iter()
        .rev()
        .find(|range| range.contains(value))
        .map(|range| range.color)
}

/// Horizontal pixel span `(left, width)` of a range preview within the bar
pub fn preview_span(range: &ColorRange, max_value: f32, bar_width: f32) -> (f32, f32) {
    let left = fill_fraction(range.min, max_value);
    let right = fill_fraction(range.max, max_value);
    let left_px = (left * bar_width).trunc();
    let width_px = ((right - left).max(0.0) * bar_width).trunc();
    (left_px, width_px)
}

/// X offsets of range boundaries strictly inside the bar
pub fn boundary_ticks(ranges: &[ColorRange], max_value: f32, bar_width: f32) -> Vec<f32> {
    if max_value <= 0.0 || !max_value.is_finite() {
        return Vec::new();
    }
    ranges
        .iter()
        .map(|range| range.max / max_value)
        .filter(|ratio| *ratio > 0.0 && *ratio < 1.0)
        .map(|ratio| (ratio * bar_width).trunc())
        .collect()
}

/// Draw one metric bar
///
/// Order: background, range previews, solid fill, border, boundary ticks, label.
/// If no range contains `value` the fill keeps whatever color was last set.
pub fn draw_metric_bar(
    canvas: &mut impl Canvas,
    label: &str,
    value: f32,
    max_value: f32,
    style: &BarStyle,
    ranges: &[ColorRange],
) {
    let BarStyle { position, size, .. } = *style;

    canvas.set_position(position);
    canvas.set_color(style.background);
    canvas.fill_box(size);

    for range in ranges {
        let (left, width) = preview_span(range, max_value, size.x);
        canvas.set_color(range.color.with_alpha_scaled(style.preview_opacity));
        canvas.set_position(position + Vec2::new(left, 0.0));
        canvas.fill_box(Vec2::new(width, size.y));
    }

    canvas.set_position(position);
    if let Some(color) = fill_color(value, ranges) {
        canvas.set_color(color);
    }
    let filled = (size.x * fill_fraction(value, max_value)).trunc();
    canvas.fill_box(Vec2::new(filled, size.y));

    canvas.set_color(Color::WHITE);
    canvas.set_position(position);
    canvas.draw_box(size);
    for x in boundary_ticks(ranges, max_value, size.x) {
        canvas.set_position(position + Vec2::new(x, 0.0));
        canvas.fill_box(Vec2::new(TICK_WIDTH_PX, size.y));
    }

    canvas.set_position(position + Vec2::new(0.0, size.y));
    canvas.draw_string(
        &format!("{}{:.6}", label, value),
        style.font_scale,
        style.font_scale,
    );
}
