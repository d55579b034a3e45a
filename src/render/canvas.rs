// Drawing surface abstraction
// The host provides the actual canvas; geometry and colors are computed here

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// RGBA color, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgba(255, 255, 255, 255);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Same color with alpha multiplied by `factor` (clamped to [0, 1])
    pub fn with_alpha_scaled(self, factor: f32) -> Self {
        let factor = if factor.is_finite() { factor.clamp(0.0, 1.0) } else { 0.0 };
        Color {
            a: (self.a as f32 * factor).round() as u8,
            ..self
        }
    }
}

/// Screen-space point or size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const fn new(x: f32, y: f32) -> Self {
        Vec2 { x, y }
    }

    /// Drop fractional pixels, matching integer canvas coordinates
    pub fn trunc(self) -> Self {
        Vec2::new(self.x.trunc(), self.y.trunc())
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Add<f32> for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x + rhs, self.y + rhs)
    }
}

impl Sub<f32> for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x - rhs, self.y - rhs)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Host drawing surface
/// Stateful like most immediate-mode canvases: color and cursor persist between calls
pub trait Canvas {
    fn set_color(&mut self, color: Color);

    fn set_position(&mut self, position: Vec2);

    /// Filled rectangle at the cursor
    fn fill_box(&mut self, size: Vec2);

    /// Rectangle outline at the cursor
    fn draw_box(&mut self, size: Vec2);

    fn draw_line(&mut self, start: Vec2, end: Vec2, width: f32);

    /// Text at the cursor
    fn draw_string(&mut self, text: &str, scale_x: f32, scale_y: f32);
}

/// A primitive issued to a canvas, with the color and cursor that applied to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    FillBox { position: Vec2, size: Vec2, color: Color },
    DrawBox { position: Vec2, size: Vec2, color: Color },
    Line { start: Vec2, end: Vec2, width: f32, color: Color },
    Text { position: Vec2, text: String, scale: f32, color: Color },
}

/// Canvas that records resolved draw commands instead of drawing
/// Used by tests and headless hosts
#[derive(Debug, Clone)]
pub struct RecordingCanvas {
    color: Color,
    position: Vec2,
    pub commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        RecordingCanvas {
            color: Color::WHITE,
            position: Vec2::default(),
            commands: Vec::new(),
        }
    }

    pub fn fills(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillBox { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Default for RecordingCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl Canvas for RecordingCanvas {
    fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    fn fill_box(&mut self, size: Vec2) {
        self.commands.push(DrawCommand::FillBox {
            position: self.position,
            size,
            color: self.color,
        });
    }

    fn draw_box(&mut self, size: Vec2) {
        self.commands.push(DrawCommand::DrawBox {
            position: self.position,
            size,
            color: self.color,
        });
    }

    fn draw_line(&mut self, start: Vec2, end: Vec2, width: f32) {
        self.commands.push(DrawCommand::Line {
            start,
            end,
            width,
            color: self.color,
        });
    }

    fn draw_string(&mut self, text: &str, scale_x: f32, _scale_y: f32) {
        self.commands.push(DrawCommand::Text {
            position: self.position,
            text: text.to_string(),
            scale: scale_x,
            color: self.color,
        });
    }
}
