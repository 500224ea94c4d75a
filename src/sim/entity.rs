//! Read-only access to entities for presentation collaborators

use glam::Vec2;

use super::asteroid::{Asteroid, SizeClass};
use super::bounds::Rect;
use super::player::Player;
use super::projectile::Projectile;

/// Anything with a place on screen
pub trait Body {
    fn position(&self) -> Vec2;
    /// Orientation in degrees
    fn angle(&self) -> f32;
    fn bounds(&self) -> Rect;
}

impl Body for Player {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn angle(&self) -> f32 {
        self.angle
    }

    fn bounds(&self) -> Rect {
        Player::bounds(self)
    }
}

impl Body for Projectile {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn angle(&self) -> f32 {
        self.angle
    }

    fn bounds(&self) -> Rect {
        Projectile::bounds(self)
    }
}

impl Body for Asteroid {
    fn position(&self) -> Vec2 {
        self.pos
    }

    fn angle(&self) -> f32 {
        self.angle
    }

    fn bounds(&self) -> Rect {
        Asteroid::bounds(self)
    }
}

/// Borrowed view of one entity
#[derive(Debug, Clone, Copy)]
pub enum EntityView<'a> {
    Player(&'a Player),
    Projectile(&'a Projectile),
    Asteroid(&'a Asteroid),
}

impl EntityView<'_> {
    fn body(&self) -> &dyn Body {
        match self {
            EntityView::Player(p) => *p,
            EntityView::Projectile(p) => *p,
            EntityView::Asteroid(a) => *a,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.body().position()
    }

    pub fn angle(&self) -> f32 {
        self.body().angle()
    }

    pub fn bounds(&self) -> Rect {
        self.body().bounds()
    }

    /// Only asteroids have a size class
    pub fn size_class(&self) -> Option<SizeClass> {
        match self {
            EntityView::Asteroid(a) => Some(a.size),
            _ => None,
        }
    }
}
