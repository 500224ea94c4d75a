//! Game settings and tuning
//!
//! Every value defaults to the compile-time constant in [`crate::consts`].
//! A JSON file can override any subset of fields; missing keys keep their
//! defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;
use crate::sim::SizeClass;

/// Player ship tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Degrees turned per tick while a rotate key is held
    pub rotation_speed: f32,
    /// Velocity added per tick while thrusting
    pub thrust_power: f32,
    /// Per-tick velocity multiplier (higher = less drag)
    pub drag: f32,
    pub max_speed: f32,
    pub ship_width: f32,
    /// Also the ship length; the nose sits half of this ahead of center
    pub ship_height: f32,
    /// Minimum ticks between shots (0 = fire on every request)
    pub fire_cooldown_ticks: u32,
    pub projectile_speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            rotation_speed: SHIP_ROTATION_SPEED,
            thrust_power: SHIP_THRUST_POWER,
            drag: SHIP_DRAG,
            max_speed: SHIP_MAX_SPEED,
            ship_width: SHIP_WIDTH,
            ship_height: SHIP_HEIGHT,
            fire_cooldown_ticks: 0,
            projectile_speed: PROJECTILE_SPEED,
        }
    }
}

/// One entry of the initial asteroid mix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedGroup {
    pub size: SizeClass,
    pub count: u32,
}

/// Asteroid population tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AsteroidTuning {
    /// Maximum simultaneously live asteroids
    pub capacity: usize,
    /// Ticks between periodic LARGE spawn attempts
    pub spawn_rate: u32,
    /// Seeded in order; seeding stops at the first failed acquisition
    pub initial_mix: Vec<SeedGroup>,
    pub large_split_count: u32,
    pub medium_split_count: u32,
    /// Max per-axis offset of split children
    pub split_jitter: i32,
    /// Distance outside the screen for left/right band spawns
    pub spawn_margin: f32,
}

impl Default for AsteroidTuning {
    fn default() -> Self {
        Self {
            capacity: POPULATION_CAPACITY,
            spawn_rate: ASTEROID_SPAWN_RATE,
            initial_mix: vec![
                SeedGroup { size: SizeClass::Large, count: 2 },
                SeedGroup { size: SizeClass::Medium, count: 3 },
                SeedGroup { size: SizeClass::Small, count: 3 },
            ],
            large_split_count: LARGE_SPLIT_COUNT,
            medium_split_count: MEDIUM_SPLIT_COUNT,
            split_jitter: SPLIT_JITTER,
            spawn_margin: SPAWN_MARGIN,
        }
    }
}

impl AsteroidTuning {
    /// Number of children spawned when an asteroid of `size` splits
    pub fn split_count(&self, size: SizeClass) -> u32 {
        match size {
            SizeClass::Large => self.large_split_count,
            SizeClass::Medium => self.medium_split_count,
            SizeClass::Small => 0,
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Playfield ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Fixed simulation rate (ticks per second)
    pub tick_rate: u32,

    // === Collision ===
    /// Scale applied to every collision radius
    pub collision_shrink: f32,

    // === Input ===
    /// How long the input consumer waits for a command before re-checking
    /// for shutdown
    pub input_poll_timeout_ms: u64,

    pub player: PlayerTuning,
    pub asteroids: AsteroidTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            tick_rate: TICK_RATE,
            collision_shrink: COLLISION_SHRINK,
            input_poll_timeout_ms: INPUT_POLL_TIMEOUT_MS,
            player: PlayerTuning::default(),
            asteroids: AsteroidTuning::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file and validate them
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from `path` if it exists, otherwise fall back to defaults
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if path.exists() {
            Self::load(path)
        } else {
            log::info!("Using default settings");
            Ok(Self::default())
        }
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        fn invalid(field: &'static str, reason: impl Into<String>) -> SettingsError {
            SettingsError::Invalid {
                field,
                reason: reason.into(),
            }
        }

        fn positive(field: &'static str, value: f32) -> Result<(), SettingsError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(invalid(field, format!("{value} must be finite and positive")))
            }
        }

        positive("screen_width", self.screen_width)?;
        positive("screen_height", self.screen_height)?;
        if self.tick_rate == 0 {
            return Err(invalid("tick_rate", "must be at least 1"));
        }
        positive("collision_shrink", self.collision_shrink)?;
        if self.input_poll_timeout_ms == 0 {
            return Err(invalid("input_poll_timeout_ms", "must be at least 1"));
        }

        let player = &self.player;
        if !(player.drag > 0.0 && player.drag <= 1.0) {
            return Err(invalid("player.drag", format!("{} is outside (0, 1]", player.drag)));
        }
        positive("player.max_speed", player.max_speed)?;
        positive("player.ship_width", player.ship_width)?;
        positive("player.ship_height", player.ship_height)?;
        positive("player.projectile_speed", player.projectile_speed)?;
        if !(player.rotation_speed.is_finite() && player.thrust_power.is_finite()) {
            return Err(invalid("player.rotation_speed/thrust_power", "must be finite"));
        }

        if !(self.asteroids.spawn_margin.is_finite() && self.asteroids.spawn_margin >= 0.0) {
            return Err(invalid("asteroids.spawn_margin", "must be finite and not negative"));
        }
        if self.asteroids.capacity == 0 {
            return Err(invalid("asteroids.capacity", "must be at least 1"));
        }
        if self.asteroids.spawn_rate == 0 {
            return Err(invalid("asteroids.spawn_rate", "must be at least 1"));
        }
        if self.asteroids.split_jitter < 0 {
            return Err(invalid("asteroids.split_jitter", "must not be negative"));
        }
        Ok(())
    }

    /// Seconds-per-tick for the fixed-rate driver
    pub fn tick_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / f64::from(self.tick_rate))
    }
}
