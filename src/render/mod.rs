// Gauge renderer
// Maps timing metrics onto threshold-colored bars and a pitch trace

pub mod canvas;
pub mod gauge;
pub mod overlay;
pub mod trace;

// Re-export main types
pub use canvas::{Canvas, Color, DrawCommand, RecordingCanvas, Vec2};
pub use gauge::{draw_metric_bar, BarStyle, ColorRange};
pub use overlay::{draw_overlay, tilt_label, OverlayFrame};
pub use trace::{draw_pitch_trace, trace_segments, TraceStyle};
