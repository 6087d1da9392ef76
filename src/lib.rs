//! Retro Racer - a top-down lane-dodging arcade racer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, traffic, collisions, damage)
//! - `game`: Session driver (menu, driving, crash screen) as an explicit loop
//! - `platform`: Input/presentation collaborators and frame pacing
//! - `assets`: Owned sprite/sound resources
//! - `settings`: Data-driven configuration

pub mod assets;
pub mod audio;
pub mod game;
pub mod platform;
pub mod settings;
pub mod sim;

pub use assets::{AssetError, GameResources};
pub use game::{Game, RunSummary};
pub use settings::{Settings, SettingsError};
pub use sim::DamageMode;

/// Game configuration constants
pub mod consts {
    /// Simulation steps per second
    pub const FPS: u32 = 60;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 800.0;
    pub const SCREEN_HEIGHT: f32 = 830.0;

    /// Player sprite size
    pub const CAR_WIDTH: f32 = 60.0;
    pub const CAR_HEIGHT: f32 = 100.0;
    /// Distance between the player's rear bumper and the bottom edge at spawn
    pub const PLAYER_BOTTOM_GAP: f32 = 50.0;

    /// Traffic sprite size
    pub const OBSTACLE_WIDTH: f32 = 60.0;
    pub const OBSTACLE_HEIGHT: f32 = 100.0;

    /// Road layout
    pub const NUM_LANES: u32 = 5;
    pub const OBSTACLE_COUNT: usize = 4;

    /// Player hitbox shrink, applied on the top-left of the sprite
    pub const COLLISION_INSET: f32 = 27.0;
    /// Slack used when deciding which side of an obstacle to push the player to
    pub const PUSH_MARGIN: f32 = 20.0;

    /// Damage model
    pub const MAX_DAMAGE: f32 = 800.0;
    pub const DAMAGE_PER_HIT: f32 = 2.0;

    /// Traffic scroll rate per unit of player speed
    pub const SCROLL_FACTOR: f32 = 0.48;
    /// Per-frame speed gain once past the nominal top speed
    pub const OVERDRIVE_CREEP: f32 = 0.005;
    /// Extra headroom above nominal top speed (40 km/h in sim units)
    pub const OVERDRIVE_HEADROOM: f32 = 40.0 / 3.6;
    /// Per-frame speed loss while braking
    pub const BRAKE_DECEL: f32 = 0.1;
    /// Per-frame return of the steering angle toward zero
    pub const ANGLE_DECAY: f32 = 3.0;
}

/// Convert a catalogue top speed (km/h) into per-frame sim units
#[inline]
pub fn to_nominal_speed(top_speed_kmh: f32) -> f32 {
    top_speed_kmh * 1000.0 / 3585.0
}

/// Speed readout shown on the HUD, truncated to whole km/h
#[inline]
pub fn speed_to_kmh(speed: f32) -> u32 {
    (speed * 3600.0 / 1000.0) as u32
}

/// Width of a single lane for the given road
#[inline]
pub fn lane_width(screen_width: f32, num_lanes: u32) -> f32 {
    (screen_width / num_lanes.max(1) as f32).floor()
}
