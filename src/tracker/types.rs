// Timing tracker types
// Events fed to the tracker, per-tick vehicle samples, and the derived metrics

use serde::{Deserialize, Serialize};

/// Per-tick snapshot of the controlled vehicle
/// Sampled by the host right before the tick is forwarded to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleSample {
    /// Vehicle can still dodge or double jump
    pub has_flip: bool,

    /// Wheels are touching the ground
    pub on_ground: bool,

    /// Jump flag for the current airborne period
    /// Cleared by the engine once the car has settled after landing
    pub has_jumped: bool,

    /// Raw pitch axis of the controller, usually [-1.0, 1.0]
    pub pitch_input: f32,

    /// Gamepad air control sensitivity multiplier
    pub pitch_sensitivity: f32,
}

impl VehicleSample {
    /// Whether this sample ends the double jump window
    /// Either the flip is gone, or the car is back on the ground without a jump in progress
    pub fn closes_window(&self) -> bool {
        !self.has_flip || (self.on_ground && !self.has_jumped)
    }

    /// Pitch tilt intensity, capped at 1.0 from above only
    /// Negative input (pushing forward) is kept negative
    pub fn tilt_intensity(&self) -> f32 {
        (self.pitch_sensitivity * self.pitch_input).min(1.0)
    }
}

/// A single input to the tracker, stamped with the host clock (seconds)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum TrackerEvent {
    /// First jump started, begins a new episode
    FirstJumpPressed { now: f32 },

    /// First jump button released
    FirstJumpReleased { now: f32 },

    /// Second jump (double jump) started
    DoubleJumpPressed { now: f32 },

    /// Vehicle input update, delivered once per physics tick
    Tick { now: f32, vehicle: VehicleSample },
}

impl TrackerEvent {
    /// Host timestamp carried by the event
    pub fn now(&self) -> f32 {
        match *self {
            TrackerEvent::FirstJumpPressed { now }
            | TrackerEvent::FirstJumpReleased { now }
            | TrackerEvent::DoubleJumpPressed { now }
            | TrackerEvent::Tick { now, .. } => now,
        }
    }
}

/// Whether the current episode can still register a double jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindowState {
    /// Airborne after the first jump, flip still available
    Open,

    /// Double jump used, flip lost, or landed
    #[default]
    Closed,
}

impl WindowState {
    pub fn is_open(&self) -> bool {
        matches!(self, WindowState::Open)
    }
}

/// Metrics recomputed on every tick
/// Durations are in seconds and may be negative if the host clock misbehaves
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TimingMetrics {
    /// How long the first jump was (or still is) held
    pub hold_first_jump: f32,

    /// Gap between first jump release and double jump press
    pub time_between_jumps: f32,
}

/// Snapshot of a finished attempt, taken when the window closes
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AttemptSummary {
    pub hold_first_jump: f32,
    pub time_between_jumps: f32,

    /// Tilt share of the jump span, in percent
    pub tilt_percentage: f32,

    /// Pitch samples recorded during the attempt
    pub samples: usize,
}

/// Share of the jump span spent tilting, in percent
/// Zero span (no double jump yet) reads as 0
pub fn tilt_percentage(accumulated_tilt: f32, total_jump_span: f32) -> f32 {
    if total_jump_span == 0.0 || !total_jump_span.is_finite() {
        return 0.0;
    }
    let percentage = 100.0 * accumulated_tilt / total_jump_span;
    if percentage.is_finite() {
        percentage
    } else {
        0.0
    }
}
