// Fast aerial episode state machine
// One episode spans a first jump press until the double jump window closes

use serde::{Deserialize, Serialize};

use crate::tracker::types::{
    tilt_percentage, AttemptSummary, TimingMetrics, TrackerEvent, VehicleSample, WindowState,
};

/// State of the current fast aerial attempt
///
/// Transitions are pure: `apply` consumes the state and an event and returns
/// the next state. A new first jump press overwrites the previous attempt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JumpEpisode {
    /// Host time of the first jump press (seconds)
    pub first_jump_press_time: f32,

    /// Host time of the first jump release, `None` until the first release ever seen
    /// Kept across episodes; only meaningful while `holding_first_jump` is false
    pub first_jump_release_time: Option<f32>,

    /// Host time of the last registered double jump
    /// Kept across episodes, see `time_between_jumps`
    pub double_jump_press_time: Option<f32>,

    /// First jump button is still held
    pub holding_first_jump: bool,

    /// Double jump window
    pub window: WindowState,

    /// Integral of tilt intensity over time while the window was open
    pub accumulated_tilt: f32,

    /// Time from first jump press to double jump press, 0 until a double jump registers
    pub total_jump_span: f32,

    /// Tilt intensity per tick while the window was open
    pub pitch_samples: Vec<f32>,

    /// Host time of the last tilt integration step
    pub last_sample_time: f32,

    /// Metrics from the most recent tick
    pub metrics: TimingMetrics,
}

impl JumpEpisode {
    /// Apply one event and return the next state
    pub fn apply(self, event: TrackerEvent) -> Self {
        match event {
            TrackerEvent::FirstJumpPressed { now } => self.first_jump_pressed(now),
            TrackerEvent::FirstJumpReleased { now } => self.first_jump_released(now),
            TrackerEvent::DoubleJumpPressed { now } => self.double_jump_pressed(now),
            TrackerEvent::Tick { now, vehicle } => self.tick(now, &vehicle),
        }
    }

    fn first_jump_pressed(mut self, now: f32) -> Self {
        self.first_jump_press_time = now;
        self.holding_first_jump = true;
        self.total_jump_span = 0.0;
        self.accumulated_tilt = 0.0;
        self.window = WindowState::Open;
        self.pitch_samples.clear();
        self.last_sample_time = now;
        self
    }

    fn first_jump_released(mut self, now: f32) -> Self {
        if self.holding_first_jump {
            self.holding_first_jump = false;
            self.first_jump_release_time = Some(now);
        }
        self
    }

    fn double_jump_pressed(mut self, now: f32) -> Self {
        // Ignored once the flip was lost or the car landed in between
        if self.window.is_open() {
            self.double_jump_press_time = Some(now);
            self.total_jump_span = now - self.first_jump_press_time;
        }
        self.window = WindowState::Closed;
        self
    }

    fn tick(mut self, now: f32, vehicle: &VehicleSample) -> Self {
        self.metrics = TimingMetrics {
            hold_first_jump: self.hold_first_jump(now),
            time_between_jumps: self.time_between_jumps(now),
        };

        if vehicle.closes_window() {
            self.window = WindowState::Closed;
        }

        if self.window.is_open() {
            let intensity = vehicle.tilt_intensity();
            self.accumulated_tilt += intensity * (now - self.last_sample_time);
            self.last_sample_time = now;
            self.pitch_samples.push(intensity);
        }
        self
    }

    /// First jump hold duration as of `now`
    pub fn hold_first_jump(&self, now: f32) -> f32 {
        if self.holding_first_jump {
            return now - self.first_jump_press_time;
        }
        match self.first_jump_release_time {
            Some(release) => release - self.first_jump_press_time,
            None => 0.0,
        }
    }

    /// Gap between release and double jump as of `now`
    ///
    /// A stale double jump from an earlier episode predates this episode's
    /// release, so the ordering check below filters it out.
    pub fn time_between_jumps(&self, now: f32) -> f32 {
        if self.holding_first_jump {
            return 0.0;
        }
        match (self.double_jump_press_time, self.first_jump_release_time) {
            (Some(double), Some(release)) if double > release => double - release,
            (_, Some(release)) if self.window.is_open() => now - release,
            _ => 0.0,
        }
    }

    /// Durations evaluated at `now`, since `metrics` only updates on ticks
    pub fn attempt_summary(&self, now: f32) -> AttemptSummary {
        AttemptSummary {
            hold_first_jump: self.hold_first_jump(now),
            time_between_jumps: self.time_between_jumps(now),
            tilt_percentage: tilt_percentage(self.accumulated_tilt, self.total_jump_span),
            samples: self.pitch_samples.len(),
        }
    }
}
