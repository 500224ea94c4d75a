//! The player's ship

use glam::Vec2;

use super::bounds::{Rect, rotated_half_extents, wrap_horizontal, wrap_vertical};
use super::projectile::Projectile;
use crate::input::{InputState, SharedInput};
use crate::settings::PlayerTuning;
use crate::{heading_vector, normalize_degrees};

/// The player-controlled ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading in degrees; 0 points up, positive turns counter-clockwise
    pub angle: f32,
    pub alive: bool,
    tuning: PlayerTuning,
    /// Ticks until the next shot is allowed
    fire_cooldown: u32,
}

impl Player {
    /// Ship at rest at `pos`, facing up
    pub fn new(pos: Vec2, tuning: PlayerTuning) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: 0.0,
            alive: true,
            tuning,
            fire_cooldown: 0,
        }
    }

    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }

    /// Axis-aligned box around the rotated ship sprite
    pub fn bounds(&self) -> Rect {
        let size = Vec2::new(self.tuning.ship_width, self.tuning.ship_height);
        Rect {
            center: self.pos,
            half_extents: rotated_half_extents(size, self.angle),
        }
    }

    pub fn collision_radius(&self, shrink: f32) -> f32 {
        self.tuning.ship_width * 0.5 * shrink
    }

    /// Tip of the ship, where projectiles appear
    pub fn nose(&self) -> Vec2 {
        self.pos + heading_vector(self.angle) * (self.tuning.ship_height * 0.5)
    }

    /// Read (and consume) the shared input, then advance one tick.
    ///
    /// Returns the projectile fired this tick, if any.
    pub fn update(&mut self, input: &SharedInput, screen: &Rect) -> Option<Projectile> {
        let controls = input.read_and_consume_shoot();
        self.step(controls, screen)
    }

    /// Advance one tick with an already-read control snapshot
    pub fn step(&mut self, controls: InputState, screen: &Rect) -> Option<Projectile> {
        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);

        if controls.rotate_left {
            self.angle += self.tuning.rotation_speed;
        }
        if controls.rotate_right {
            self.angle -= self.tuning.rotation_speed;
        }
        self.angle = normalize_degrees(self.angle);

        if controls.thrust_on {
            self.vel += heading_vector(self.angle) * self.tuning.thrust_power;
        }

        // A request during cooldown is consumed and dropped
        let fired = if controls.shoot_request && self.fire_cooldown == 0 {
            self.fire_cooldown = self.tuning.fire_cooldown_ticks;
            Some(self.shoot())
        } else {
            None
        };

        self.vel *= self.tuning.drag;

        let speed_sq = self.vel.length_squared();
        let max = self.tuning.max_speed;
        if speed_sq > max * max {
            let scale = if speed_sq > 0.0 { max / speed_sq.sqrt() } else { 0.0 };
            self.vel *= scale;
        }

        self.pos += self.vel;

        self.pos.x = wrap_horizontal(&self.bounds(), screen);
        self.pos.y = wrap_vertical(&self.bounds(), screen);

        fired
    }

    /// A projectile leaving the nose along the current heading
    pub fn shoot(&self) -> Projectile {
        Projectile::new(self.nose(), self.angle, self.tuning.projectile_speed)
    }
}
