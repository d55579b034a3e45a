// Plugin context
// Owns the tracker and settings for the lifetime of a load; every host callback lands here

use thiserror::Error;

use crate::host::{GameHost, HookEvent, PluginHost, VehicleState};
use crate::render::{draw_overlay, Canvas, OverlayFrame};
use crate::settings::{SettingsError, TrainerSettings};
use crate::tracker::TimingTracker;

/// Errors that can occur while loading or reconfiguring the plugin
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Failed to hook {event}: {reason}")]
    HookRegistration { event: &'static str, reason: String },

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Trainer state shared by all callbacks
pub struct TrainerPlugin {
    tracker: TimingTracker,
    settings: TrainerSettings,
    hooked: Vec<HookEvent>,
}

impl TrainerPlugin {
    /// Validate settings and register every hook plus the drawable
    /// On failure, hooks registered so far are removed again
    pub fn load(host: &mut impl PluginHost, settings: TrainerSettings) -> Result<Self, PluginError> {
        settings.validate()?;

        let mut hooked: Vec<HookEvent> = Vec::with_capacity(HookEvent::ALL.len());
        for event in HookEvent::ALL {
            if let Err(reason) = host.hook_event(event.name()) {
                log::error!("Failed to hook {}: {}", event.name(), reason);
                for registered in hooked.drain(..) {
                    host.unhook_event(registered.name());
                }
                return Err(PluginError::HookRegistration {
                    event: event.name(),
                    reason,
                });
            }
            hooked.push(event);
        }
        host.register_drawable();

        log::info!("Fast aerial trainer loaded, {} hooks registered", hooked.len());
        Ok(TrainerPlugin {
            tracker: TimingTracker::new(),
            settings,
            hooked,
        })
    }

    /// Remove every hook and the drawable
    pub fn unload(self, host: &mut impl PluginHost) {
        host.unregister_drawable();
        for event in &self.hooked {
            host.unhook_event(event.name());
        }
        log::info!("Fast aerial trainer unloaded");
    }

    /// Forward a hooked engine event to the tracker
    pub fn on_hook(&mut self, game: &impl GameHost, event: HookEvent, car: &impl VehicleState) {
        let now = game.now();
        match event {
            HookEvent::FirstJumpPressed => self.tracker.on_first_jump_pressed(now),
            HookEvent::FirstJumpReleased => self.tracker.on_first_jump_released(now),
            HookEvent::DoubleJumpPressed => self.tracker.on_double_jump_pressed(now),
            HookEvent::Tick => {
                let sample = car.sample(game.air_control_sensitivity());
                self.tracker.on_tick(now, sample);
            }
        }
    }

    /// Dispatch by engine function name; returns false for names the trainer doesn't hook
    pub fn on_hook_name(&mut self, game: &impl GameHost, name: &str, car: &impl VehicleState) -> bool {
        match HookEvent::from_name(name) {
            Some(event) => {
                self.on_hook(game, event, car);
                true
            }
            None => {
                log::trace!("Ignoring unhooked event {}", name);
                false
            }
        }
    }

    /// Per-frame drawable callback, skipped while the game is paused
    pub fn render(&self, game: &impl GameHost, canvas: &mut impl Canvas) {
        if game.is_paused() {
            return;
        }
        let frame = OverlayFrame::from_tracker(&self.tracker);
        draw_overlay(canvas, &frame, &self.settings);
    }

    pub fn settings(&self) -> &TrainerSettings {
        &self.settings
    }

    /// Replace settings; invalid settings leave the current ones in place
    pub fn set_settings(&mut self, settings: TrainerSettings) -> Result<(), PluginError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    pub fn tracker(&self) -> &TimingTracker {
        &self.tracker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingCanvas;
    use crate::tracker::WindowState;
    use std::cell::Cell;

    #[derive(Default)]
    struct FakeHost {
        hooked: Vec<&'static str>,
        drawable: bool,
        fail_on: Option<&'static str>,
    }

    impl PluginHost for FakeHost {
        fn hook_event(&mut self, event_name: &'static str) -> Result<(), String> {
            if self.fail_on == Some(event_name) {
                return Err("unknown function".to_string());
            }
            self.hooked.push(event_name);
            Ok(())
        }

        fn unhook_event(&mut self, event_name: &'static str) {
            self.hooked.retain(|name| *name != event_name);
        }

        fn register_drawable(&mut self) {
            self.drawable = true;
        }

        fn unregister_drawable(&mut self) {
            self.drawable = false;
        }
    }

    struct FakeGame {
        time: Cell<Option<f32>>,
        paused: bool,
        sensitivity: f32,
    }

    impl FakeGame {
        fn at(time: f32) -> Self {
            FakeGame {
                time: Cell::new(Some(time)),
                paused: false,
                sensitivity: 1.0,
            }
        }

        fn advance_to(&self, time: f32) {
            self.time.set(Some(time));
        }
    }

    impl GameHost for FakeGame {
        fn time_seconds(&self) -> Option<f32> {
            self.time.get()
        }

        fn is_paused(&self) -> bool {
            self.paused
        }

        fn air_control_sensitivity(&self) -> f32 {
            self.sensitivity
        }
    }

    struct FakeCar {
        has_flip: bool,
        on_ground: bool,
        has_jumped: bool,
        pitch: f32,
    }

    impl VehicleState for FakeCar {
        fn has_flip(&self) -> bool {
            self.has_flip
        }

        fn is_on_ground(&self) -> bool {
            self.on_ground
        }

        fn has_jumped(&self) -> bool {
            self.has_jumped
        }

        fn pitch_input(&self) -> f32 {
            self.pitch
        }
    }

    fn airborne_car(pitch: f32) -> FakeCar {
        FakeCar {
            has_flip: true,
            on_ground: false,
            has_jumped: true,
            pitch,
        }
    }

    fn loaded() -> (FakeHost, TrainerPlugin) {
        let mut host = FakeHost::default();
        let plugin = TrainerPlugin::load(&mut host, TrainerSettings::default()).unwrap();
        (host, plugin)
    }

    #[test]
    fn test_load_registers_hooks_and_drawable() {
        let (host, _plugin) = loaded();
        assert!(host.drawable);
        assert_eq!(host.hooked.len(), 4);
        assert!(host.hooked.contains(&"Function TAGame.Car_TA.SetVehicleInput"));
    }

    #[test]
    fn test_unload_removes_everything() {
        let (mut host, plugin) = loaded();
        plugin.unload(&mut host);
        assert!(!host.drawable);
        assert!(host.hooked.is_empty());
    }

    #[test]
    fn test_failed_hook_rolls_back() {
        let mut host = FakeHost {
            fail_on: Some(HookEvent::DoubleJumpPressed.name()),
            ..FakeHost::default()
        };
        let result = TrainerPlugin::load(&mut host, TrainerSettings::default());
        assert!(matches!(result, Err(PluginError::HookRegistration { .. })));
        assert!(host.hooked.is_empty());
        assert!(!host.drawable);
    }

    #[test]
    fn test_load_rejects_invalid_settings() {
        let mut host = FakeHost::default();
        let settings = TrainerSettings {
            gui_size: 0.0,
            ..TrainerSettings::default()
        };
        let result = TrainerPlugin::load(&mut host, settings);
        assert!(matches!(result, Err(PluginError::Settings(_))));
        assert!(host.hooked.is_empty());
    }

    #[test]
    fn test_hook_sequence_drives_tracker() {
        let (_host, mut plugin) = loaded();
        let game = FakeGame::at(3.0);
        let car = airborne_car(1.0);

        plugin.on_hook(&game, HookEvent::FirstJumpPressed, &car);
        game.advance_to(3.2);
        plugin.on_hook(&game, HookEvent::FirstJumpReleased, &car);
        game.advance_to(3.25);
        plugin.on_hook(&game, HookEvent::Tick, &car);
        game.advance_to(3.3);
        plugin.on_hook(&game, HookEvent::DoubleJumpPressed, &car);
        game.advance_to(3.35);
        plugin.on_hook(&game, HookEvent::Tick, &car);

        let tracker = plugin.tracker();
        assert!((tracker.metrics().hold_first_jump - 0.2).abs() < 1e-4);
        assert!((tracker.metrics().time_between_jumps - 0.1).abs() < 1e-4);
        assert!((tracker.total_jump_span() - 0.3).abs() < 1e-4);
        assert_eq!(tracker.window(), WindowState::Closed);
    }

    #[test]
    fn test_dispatch_by_name() {
        let (_host, mut plugin) = loaded();
        let game = FakeGame::at(1.0);
        let car = airborne_car(0.0);

        assert!(plugin.on_hook_name(&game, HookEvent::FirstJumpPressed.name(), &car));
        assert_eq!(plugin.tracker().window(), WindowState::Open);
        assert!(!plugin.on_hook_name(&game, "Function TAGame.Ball_TA.Explode", &car));
    }

    #[test]
    fn test_tick_uses_host_sensitivity() {
        let (_host, mut plugin) = loaded();
        let mut game = FakeGame::at(0.0);
        game.sensitivity = 1.5;
        let car = airborne_car(0.5);

        plugin.on_hook(&game, HookEvent::FirstJumpPressed, &car);
        game.advance_to(0.1);
        plugin.on_hook(&game, HookEvent::Tick, &car);
        assert_eq!(plugin.tracker().pitch_samples(), &[0.75]);
    }

    #[test]
    fn test_render_skipped_while_paused() {
        let (_host, plugin) = loaded();
        let mut game = FakeGame::at(0.0);
        game.paused = true;

        let mut canvas = RecordingCanvas::new();
        plugin.render(&game, &mut canvas);
        assert!(canvas.commands.is_empty());

        game.paused = false;
        plugin.render(&game, &mut canvas);
        assert_eq!(canvas.texts().len(), 3);
    }

    #[test]
    fn test_render_does_not_touch_tracker() {
        let (_host, mut plugin) = loaded();
        let game = FakeGame::at(0.0);
        plugin.on_hook(&game, HookEvent::FirstJumpPressed, &airborne_car(0.0));
        let before = plugin.tracker().episode().clone();

        let mut canvas = RecordingCanvas::new();
        for _ in 0..3 {
            plugin.render(&game, &mut canvas);
        }
        assert_eq!(plugin.tracker().episode(), &before);
    }

    #[test]
    fn test_set_settings_keeps_old_on_error() {
        let (_host, mut plugin) = loaded();
        let bad = TrainerSettings {
            preview_opacity: -1.0,
            ..TrainerSettings::default()
        };
        assert!(plugin.set_settings(bad).is_err());
        assert_eq!(plugin.settings(), &TrainerSettings::default());

        let good = TrainerSettings {
            draw_pitch_history: false,
            ..TrainerSettings::default()
        };
        plugin.set_settings(good).unwrap();
        assert!(!plugin.settings().draw_pitch_history);
    }
}
