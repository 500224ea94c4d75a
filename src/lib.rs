//! Asteroids - an arcade asteroid-field simulation
//!
//! Core modules:
//! - `sim`: Simulation (entities, population limit, collisions, session state)
//! - `input`: Threaded input bridge (command queue + shared input state)
//! - `settings`: Data-driven game tuning
//! - `error`: Error types for setup and input plumbing

pub mod error;
pub mod input;
pub mod settings;
pub mod sim;

pub use error::{InputError, SettingsError};
pub use input::{Command, InputBridge, InputState, SharedInput};
pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;

    /// Default playfield dimensions
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// Maximum simultaneously live asteroids
    pub const POPULATION_CAPACITY: usize = 15;
    /// Ticks between periodic LARGE spawns (once per second at 60 Hz)
    pub const ASTEROID_SPAWN_RATE: u32 = 60;
    /// Distance outside the screen for left/right band spawns
    pub const SPAWN_MARGIN: f32 = 100.0;
    /// Max per-axis offset of split children from their parent
    pub const SPLIT_JITTER: i32 = 10;
    /// Children per LARGE -> MEDIUM split
    pub const LARGE_SPLIT_COUNT: u32 = 2;
    /// Children per MEDIUM -> SMALL split
    pub const MEDIUM_SPLIT_COUNT: u32 = 2;
    /// Collision circles are shrunk relative to the sprite so hits feel fair
    pub const COLLISION_SHRINK: f32 = 0.8;
    /// Side length of the unscaled asteroid sprite
    pub const ASTEROID_BASE_SIZE: f32 = 100.0;

    /// Player ship defaults
    pub const SHIP_WIDTH: f32 = 65.0;
    pub const SHIP_HEIGHT: f32 = 78.0;
    pub const SHIP_ROTATION_SPEED: f32 = 4.5; // degrees per tick
    pub const SHIP_THRUST_POWER: f32 = 0.25;
    pub const SHIP_DRAG: f32 = 0.99; // higher = less drag
    pub const SHIP_MAX_SPEED: f32 = 6.0;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 10.0;
    pub const PROJECTILE_WIDTH: f32 = 4.0;
    pub const PROJECTILE_HEIGHT: f32 = 10.0;

    /// Input consumer poll timeout (lets it notice shutdown)
    pub const INPUT_POLL_TIMEOUT_MS: u64 = 100;
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Unit heading vector for a ship-style angle (degrees, 0 = up, CCW positive).
///
/// Screen Y grows downward, so "up" is `(0, -1)`.
#[inline]
pub fn heading_vector(angle_deg: f32) -> Vec2 {
    let rad = angle_deg.to_radians();
    Vec2::new((-rad).sin(), -(-rad).cos())
}
