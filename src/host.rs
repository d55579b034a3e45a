// Host engine contracts
// What the trainer needs from the game: clock, vehicle state, hooks and a drawable slot

use crate::tracker::VehicleSample;

/// Engine events the trainer hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEvent {
    /// First jump component became active
    FirstJumpPressed,

    /// Jump button released
    FirstJumpReleased,

    /// Double jump component became active
    DoubleJumpPressed,

    /// Vehicle input applied, once per physics tick
    Tick,
}

impl HookEvent {
    pub const ALL: [HookEvent; 4] = [
        HookEvent::FirstJumpPressed,
        HookEvent::FirstJumpReleased,
        HookEvent::DoubleJumpPressed,
        HookEvent::Tick,
    ];

    /// Engine function name to hook
    pub fn name(&self) -> &'static str {
        match self {
            HookEvent::FirstJumpPressed => "Function CarComponent_Jump_TA.Active.BeginState",
            HookEvent::FirstJumpReleased => "Function TAGame.Car_TA.OnJumpReleased",
            HookEvent::DoubleJumpPressed => "Function CarComponent_DoubleJump_TA.Active.BeginState",
            HookEvent::Tick => "Function TAGame.Car_TA.SetVehicleInput",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        HookEvent::ALL.into_iter().find(|event| event.name() == name)
    }
}

/// Game-wide state queries
pub trait GameHost {
    /// Simulation clock in seconds, `None` outside an active session
    fn time_seconds(&self) -> Option<f32>;

    fn is_paused(&self) -> bool;

    /// Gamepad air control sensitivity multiplier
    fn air_control_sensitivity(&self) -> f32;

    /// Clock reading with the neutral zero fallback
    fn now(&self) -> f32 {
        self.time_seconds().unwrap_or(0.0)
    }
}

/// State of the car that triggered a hook
pub trait VehicleState {
    fn has_flip(&self) -> bool;

    fn is_on_ground(&self) -> bool;

    /// Jumped during the current airborne period
    fn has_jumped(&self) -> bool;

    /// Controller pitch axis
    fn pitch_input(&self) -> f32;

    /// Snapshot for the tracker
    fn sample(&self, pitch_sensitivity: f32) -> VehicleSample {
        VehicleSample {
            has_flip: self.has_flip(),
            on_ground: self.is_on_ground(),
            has_jumped: self.has_jumped(),
            pitch_input: self.pitch_input(),
            pitch_sensitivity,
        }
    }
}

/// Registration side of the host, used at load and unload
pub trait PluginHost {
    /// Start delivering `event_name` to the plugin
    fn hook_event(&mut self, event_name: &'static str) -> Result<(), String>;

    fn unhook_event(&mut self, event_name: &'static str);

    /// Start calling the plugin's render callback every frame
    fn register_drawable(&mut self);

    fn unregister_drawable(&mut self);
}
