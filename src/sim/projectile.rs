//! Projectiles fired by the player

use glam::Vec2;

use super::bounds::Rect;
use crate::consts::{PROJECTILE_HEIGHT, PROJECTILE_WIDTH};
use crate::heading_vector;

/// A projectile travelling in a straight line at fixed speed
#[derive(Debug, Clone)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading it was fired along (degrees)
    pub angle: f32,
}

impl Projectile {
    pub fn new(pos: Vec2, angle: f32, speed: f32) -> Self {
        Self {
            pos,
            vel: heading_vector(angle) * speed,
            angle,
        }
    }

    /// The sprite is not rotated, so neither is the box
    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT))
    }

    /// Advance one tick. Returns false once the projectile has fully left the
    /// screen and should be culled.
    pub fn update(&mut self, screen: &Rect) -> bool {
        self.pos += self.vel;
        !self.bounds().fully_outside(screen)
    }
}
