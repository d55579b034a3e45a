// Timing tracker module
// Turns jump events and per-tick vehicle samples into fast aerial timing metrics

pub mod episode;
pub mod types;

pub use episode::JumpEpisode;
pub use types::{
    tilt_percentage, AttemptSummary, TimingMetrics, TrackerEvent, VehicleSample, WindowState,
};

/// Owns the active episode and feeds host events through it
#[derive(Debug, Default)]
pub struct TimingTracker {
    episode: JumpEpisode,

    /// Summary of the most recent closed window
    last_attempt: Option<AttemptSummary>,
}

impl TimingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_first_jump_pressed(&mut self, now: f32) {
        self.handle(TrackerEvent::FirstJumpPressed { now });
    }

    pub fn on_first_jump_released(&mut self, now: f32) {
        self.handle(TrackerEvent::FirstJumpReleased { now });
    }

    pub fn on_double_jump_pressed(&mut self, now: f32) {
        self.handle(TrackerEvent::DoubleJumpPressed { now });
    }

    pub fn on_tick(&mut self, now: f32, vehicle: VehicleSample) {
        self.handle(TrackerEvent::Tick { now, vehicle });
    }

    /// Apply an event to the active episode
    pub fn handle(&mut self, event: TrackerEvent) {
        let was_open = self.episode.window.is_open();
        let had_double_jump = self.episode.double_jump_press_time;

        self.episode = std::mem::take(&mut self.episode).apply(event);

        match event {
            TrackerEvent::FirstJumpPressed { now } => {
                log::debug!("First jump at {:.3}s, double jump window open", now);
            }
            TrackerEvent::DoubleJumpPressed { now }
                if self.episode.double_jump_press_time != had_double_jump =>
            {
                log::debug!(
                    "Double jump registered at {:.3}s, span {:.1} ms",
                    now,
                    self.episode.total_jump_span * 1000.0
                );
            }
            _ => {}
        }

        if was_open && !self.episode.window.is_open() {
            let summary = self.episode.attempt_summary(event.now());
            log::debug!(
                "Window closed: hold {:.1} ms, gap {:.1} ms, tilt {:.1}%, {} samples",
                summary.hold_first_jump * 1000.0,
                summary.time_between_jumps * 1000.0,
                summary.tilt_percentage,
                summary.samples
            );
            self.last_attempt = Some(summary);
        }
    }

    /// Metrics from the latest tick
    pub fn metrics(&self) -> TimingMetrics {
        self.episode.metrics
    }

    pub fn accumulated_tilt(&self) -> f32 {
        self.episode.accumulated_tilt
    }

    pub fn total_jump_span(&self) -> f32 {
        self.episode.total_jump_span
    }

    /// Tilt intensity history of the current episode
    pub fn pitch_samples(&self) -> &[f32] {
        &self.episode.pitch_samples
    }

    /// Summary of the last attempt whose window closed, if any
    pub fn last_attempt(&self) -> Option<AttemptSummary> {
        self.last_attempt
    }

    pub fn window(&self) -> WindowState {
        self.episode.window
    }

    pub fn episode(&self) -> &JumpEpisode {
        &self.episode
    }
}
