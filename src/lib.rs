//! Shmup - simulation core for a 2D arcade space shooter
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (actors, pools, collisions, world)
//! - `settings`: Construction parameters for a world
//! - `render`: Plain-data sprite instances for an external batcher
//! - `error`: Construction-time errors

pub mod error;
pub mod render;
pub mod settings;
pub mod sim;

pub use error::{SettingsError, SheetError, SimError};
pub use settings::Settings;
pub use sim::{TickInput, World};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Multiplier applied to elapsed seconds before any motion integration.
    /// One "scaled unit" is roughly one frame at 75 Hz.
    pub const TIME_SCALE: f32 = 75.0;

    /// Player thrust (velocity change per scaled unit)
    pub const PLAYER_ACCELERATION: f32 = 0.05;
    /// Player turn rate (degrees per scaled unit)
    pub const PLAYER_TURN_RATE: f32 = 4.25;
    pub const PLAYER_MAX_VELOCITY: f32 = 5.0;
    pub const PLAYER_MIN_VELOCITY: f32 = 0.0;
    pub const PLAYER_MAX_HEALTH: u32 = 10;
    /// Explosion slots owned by the player
    pub const PLAYER_EXPLOSION_COUNT: usize = 2;

    /// Burst fire: shots per trigger pull
    pub const BURST_SHOT_COUNT: u32 = 5;
    /// Burst fire: seconds between shots
    pub const BURST_INTERVAL: f32 = 0.05;
    /// Automatic fire: seconds between shots
    pub const AUTOMATIC_INTERVAL: f32 = 0.2;

    /// Invulnerability window after a hit (seconds)
    pub const INVULNERABILITY_DURATION: f32 = 2.0;
    /// Visibility toggle period while invulnerable (seconds)
    pub const FLICKER_INTERVAL: f32 = 0.1;

    pub const LASER_VELOCITY: f32 = 6.0;

    /// Full explosion animation (seconds)
    pub const EXPLOSION_DURATION: f32 = 1.0;
    pub const EXPLOSION_FRAME_COUNT: usize = 64;
    /// Scale of the explosion that plays when a ship is destroyed
    pub const TERMINAL_EXPLOSION_SCALE: f32 = 2.0;

    pub const ENEMY_LASER_COUNT: usize = 10;
    pub const ENEMY_EXPLOSION_COUNT: usize = 2;
    /// Enemy turn rate while pursuing or disengaging (degrees per scaled unit)
    pub const ENEMY_TURN_RATE: f32 = 1.0;
    /// Seconds between enemy fire attempts
    pub const ENEMY_FIRE_INTERVAL: f32 = 1.0;
    /// Enemy only fires when the bearing check is below this (degrees)
    pub const ENEMY_FIRE_BEARING: f32 = 45.0;
    /// Muzzle distance from the enemy center along its facing
    pub const ENEMY_MUZZLE_OFFSET: f32 = 19.0;
    /// Pursuit breaks off inside this distance to the player
    pub const ENEMY_DISENGAGE_DISTANCE: f32 = 75.0;
    /// Seconds the enemy keeps turning after breaking off
    pub const ENEMY_DISENGAGE_TURN_WINDOW: f32 = 2.0;
    /// Fixed part of the re-engage cooldown (seconds)
    pub const ENEMY_REENGAGE_BASE: f32 = 1.0;
    /// Random extra whole seconds added to the cooldown (inclusive range)
    pub const ENEMY_REENGAGE_EXTRA_MIN: u32 = 2;
    pub const ENEMY_REENGAGE_EXTRA_MAX: u32 = 5;

    /// Asteroid speed range (scaled units)
    pub const ASTEROID_MIN_VELOCITY: f32 = 0.5;
    pub const ASTEROID_MAX_VELOCITY: f32 = 1.4;
    /// Asteroid spin range (degrees per scaled unit, symmetric)
    pub const ASTEROID_MAX_SPIN: f32 = 2.0;

    /// Star drift (pixels per scaled unit, downward)
    pub const STAR_DRIFT: f32 = 1.0;
    /// Ticks between star twinkles
    pub const STAR_TWINKLE_PERIOD: u32 = 20;

    /// Number of fire-mode indicator pips
    pub const FIRE_MODE_PIP_COUNT: usize = 10;
    pub const FIRE_MODE_PIP_SCALE: f32 = 0.5;
    pub const FIRE_MODE_PIP_SPACING: f32 = 5.0;
    pub const HEALTH_PIP_SPACING: f32 = 15.0;
    /// Vertical gap between the health row and the fire-mode row
    pub const HUD_ROW_GAP: f32 = 20.0;
}

/// Wrap an angle in degrees to [0, 360)
#[inline]
pub fn wrap_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Signed shortest difference `to - from` in degrees, in (-180, 180]
#[inline]
pub fn delta_degrees(from: f32, to: f32) -> f32 {
    let d = wrap_degrees(to - from);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Unit vector for a facing measured in degrees from the +x axis
#[inline]
pub fn heading(direction_deg: f32) -> Vec2 {
    let rad = direction_deg.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}
