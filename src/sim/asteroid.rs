//! Asteroid entity and size classes

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bounds::{Rect, rotated_half_extents, wrap_horizontal};
use super::population::Permit;
use crate::consts::ASTEROID_BASE_SIZE;
use crate::normalize_degrees;

/// Asteroid size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeClass {
    Large,
    Medium,
    Small,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Large, SizeClass::Medium, SizeClass::Small];

    /// Sprite scale relative to the base asteroid image
    pub fn scale(self) -> f32 {
        match self {
            SizeClass::Large => 0.2,
            SizeClass::Medium => 0.1,
            SizeClass::Small => 0.06,
        }
    }

    pub fn score(self) -> u64 {
        match self {
            SizeClass::Large => 20,
            SizeClass::Medium => 50,
            SizeClass::Small => 100,
        }
    }

    pub fn speed_multiplier(self) -> f32 {
        match self {
            SizeClass::Large => 1.0,
            SizeClass::Medium => 1.3,
            SizeClass::Small => 1.6,
        }
    }

    /// Collision radius before the shrink factor
    pub fn base_radius(self) -> f32 {
        match self {
            SizeClass::Large => 10.0,
            SizeClass::Medium => 5.0,
            SizeClass::Small => 3.0,
        }
    }

    /// Side length of the (square) sprite
    pub fn side_length(self) -> f32 {
        ASTEROID_BASE_SIZE * self.scale()
    }

    /// Class of the fragments produced when this asteroid splits
    pub fn fragment(self) -> Option<SizeClass> {
        match self {
            SizeClass::Large => Some(SizeClass::Medium),
            SizeClass::Medium => Some(SizeClass::Small),
            SizeClass::Small => None,
        }
    }
}

/// What happened to an asteroid during its update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsteroidStep {
    Drifting,
    /// Crossed the top or bottom of the screen; removed without splitting
    LeftScreen,
}

/// A drifting asteroid.
///
/// Holds one unit of the population limit for as long as it exists.
#[derive(Debug)]
pub struct Asteroid {
    pub id: u32,
    pub size: SizeClass,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Visual rotation (degrees), independent of the direction of travel
    pub angle: f32,
    /// Degrees per tick
    pub rotation_speed: f32,
    _permit: Permit,
}

impl Asteroid {
    /// Create an asteroid with randomized spin and drift for its size class
    pub fn new(id: u32, size: SizeClass, pos: Vec2, permit: Permit, rng: &mut impl Rng) -> Self {
        let angle = rng.random_range(0.0..360.0);
        let rotation_speed = loop {
            let speed: f32 = rng.random_range(-2.5..2.5);
            // Too slow looks static
            if speed.abs() >= 0.5 {
                break speed;
            }
        };

        let heading = rng.random_range(0.0f32..360.0).to_radians();
        let speed = rng.random_range(1.0f32..2.5) * size.speed_multiplier();
        let vel = Vec2::new(heading.cos(), heading.sin()) * speed;

        Self {
            id,
            size,
            pos,
            vel,
            angle,
            rotation_speed,
            _permit: permit,
        }
    }

    /// Axis-aligned box around the rotated sprite
    pub fn bounds(&self) -> Rect {
        Rect {
            center: self.pos,
            half_extents: rotated_half_extents(Vec2::splat(self.size.side_length()), self.angle),
        }
    }

    pub fn collision_radius(&self, shrink: f32) -> f32 {
        self.size.base_radius() * shrink
    }

    /// Spin, drift, wrap horizontally; report a vertical exit
    pub fn update(&mut self, screen: &Rect) -> AsteroidStep {
        self.angle = normalize_degrees(self.angle + self.rotation_speed);
        self.pos += self.vel;

        self.pos.x = wrap_horizontal(&self.bounds(), screen);

        let bounds = self.bounds();
        if bounds.top() > screen.bottom() || bounds.bottom() < screen.top() {
            AsteroidStep::LeftScreen
        } else {
            AsteroidStep::Drifting
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::population::PopulationLimit;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn stationary(size: SizeClass, pos: Vec2, limit: &PopulationLimit) -> Asteroid {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut asteroid = Asteroid::new(1, size, pos, limit.try_acquire().unwrap(), &mut rng);
        asteroid.vel = Vec2::ZERO;
        asteroid.angle = 0.0;
        asteroid.rotation_speed = 0.0;
        asteroid
    }

    #[test]
    fn test_size_class_properties() {
        assert_eq!(SizeClass::Large.score(), 20);
        assert_eq!(SizeClass::Medium.score(), 50);
        assert_eq!(SizeClass::Small.score(), 100);
        assert!((SizeClass::Large.side_length() - 20.0).abs() < 1e-4);
        assert!((SizeClass::Small.side_length() - 6.0).abs() < 1e-4);
        assert_eq!(SizeClass::Large.fragment(), Some(SizeClass::Medium));
        assert_eq!(SizeClass::Medium.fragment(), Some(SizeClass::Small));
        assert_eq!(SizeClass::Small.fragment(), None);
    }

    #[test]
    fn test_random_motion_in_range() {
        let limit = PopulationLimit::new(64);
        let mut rng = Pcg32::seed_from_u64(42);
        for size in SizeClass::ALL {
            for id in 0..16 {
                let permit = limit.try_acquire().unwrap();
                let a = Asteroid::new(id, size, Vec2::ZERO, permit, &mut rng);
                let speed = a.vel.length();
                let mult = size.speed_multiplier();
                assert!(speed >= 1.0 * mult - 1e-4 && speed < 2.5 * mult + 1e-4);
                assert!(a.rotation_speed.abs() >= 0.5 && a.rotation_speed.abs() <= 2.5);
                assert!((0.0..360.0).contains(&a.angle));
            }
        }
    }

    #[test]
    fn test_dropping_asteroid_releases_unit() {
        let limit = PopulationLimit::new(2);
        let asteroid = stationary(SizeClass::Large, Vec2::new(50.0, 50.0), &limit);
        assert_eq!(limit.outstanding(), 1);
        drop(asteroid);
        assert_eq!(limit.outstanding(), 0);
    }

    #[test]
    fn test_horizontal_wrap_left_to_right() {
        let limit = PopulationLimit::new(1);
        let screen = Rect::screen(800.0, 600.0);
        let mut a = stationary(SizeClass::Large, Vec2::new(-9.0, 300.0), &limit);
        a.vel = Vec2::new(-2.0, 0.0);

        assert_eq!(a.update(&screen), AsteroidStep::Drifting);
        let bounds = a.bounds();
        assert!((bounds.left() - 800.0).abs() < 1e-4, "re-enters flush with the right edge");
    }

    #[test]
    fn test_horizontal_wrap_right_to_left() {
        let limit = PopulationLimit::new(1);
        let screen = Rect::screen(800.0, 600.0);
        let mut a = stationary(SizeClass::Medium, Vec2::new(804.0, 300.0), &limit);
        a.vel = Vec2::new(2.0, 0.0);

        assert_eq!(a.update(&screen), AsteroidStep::Drifting);
        assert!(a.bounds().right().abs() < 1e-4);
    }

    #[test]
    fn test_vertical_exit_reports_left_screen() {
        let limit = PopulationLimit::new(2);
        let screen = Rect::screen(800.0, 600.0);

        let mut falling = stationary(SizeClass::Small, Vec2::new(100.0, 603.5), &limit);
        falling.vel = Vec2::new(0.0, 1.0);
        assert_eq!(falling.update(&screen), AsteroidStep::LeftScreen);

        let mut rising = stationary(SizeClass::Small, Vec2::new(100.0, -2.5), &limit);
        rising.vel = Vec2::new(0.0, -1.0);
        assert_eq!(rising.update(&screen), AsteroidStep::LeftScreen);
    }

    #[test]
    fn test_update_spins_and_wraps_angle() {
        let limit = PopulationLimit::new(1);
        let screen = Rect::screen(800.0, 600.0);
        let mut a = stationary(SizeClass::Large, Vec2::new(400.0, 300.0), &limit);
        a.angle = 359.0;
        a.rotation_speed = 2.0;
        a.update(&screen);
        assert!((a.angle - 1.0).abs() < 1e-3);
    }
}
