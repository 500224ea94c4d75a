//! Collision detection and resolution
//!
//! Projectiles hit asteroids by strict bounding-box overlap; the player is hit
//! by circle overlap using shrunken radii so grazing contacts are forgiven.

use rand::Rng;

use super::asteroid::Asteroid;
use super::bounds::circles_overlap;
use super::player::Player;
use super::population::{AsteroidField, Destroyed};
use super::projectile::Projectile;

/// One projectile and every asteroid its box overlapped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectileHit {
    /// Index into the projectile list
    pub projectile: usize,
    /// Ids of the asteroids it overlapped, in field order
    pub asteroids: Vec<u32>,
}

/// Outcome of resolving projectile hits for one tick
#[derive(Debug, Default)]
pub struct Resolution {
    pub score: u64,
    pub destroyed: Vec<Destroyed>,
    pub projectiles_consumed: usize,
}

/// All projectile/asteroid overlaps, computed before anything is destroyed
pub fn projectile_asteroid_hits(projectiles: &[Projectile], asteroids: &[Asteroid]) -> Vec<ProjectileHit> {
    projectiles
        .iter()
        .enumerate()
        .filter_map(|(index, projectile)| {
            let bounds = projectile.bounds();
            let hit: Vec<u32> = asteroids
                .iter()
                .filter(|a| bounds.intersects(&a.bounds()))
                .map(|a| a.id)
                .collect();
            (!hit.is_empty()).then_some(ProjectileHit {
                projectile: index,
                asteroids: hit,
            })
        })
        .collect()
}

/// Remove every projectile that hit something and destroy (with splitting)
/// each asteroid it hit.
///
/// An asteroid hit by several projectiles scores once; later hits find it
/// already gone. Fragments spawned here are not checked until the next tick.
pub fn resolve_projectile_hits(
    projectiles: &mut Vec<Projectile>,
    field: &mut AsteroidField,
    rng: &mut impl Rng,
) -> Resolution {
    let hits = projectile_asteroid_hits(projectiles, field.asteroids());
    let mut resolution = Resolution::default();
    if hits.is_empty() {
        return resolution;
    }

    for hit in &hits {
        for &id in &hit.asteroids {
            if let Some(destroyed) = field.destroy(id, true, rng) {
                resolution.score += destroyed.size.score();
                resolution.destroyed.push(destroyed);
            }
        }
    }

    let mut index = 0;
    let mut next_hit = hits.iter().map(|h| h.projectile).peekable();
    projectiles.retain(|_| {
        let consumed = next_hit.next_if_eq(&index).is_some();
        index += 1;
        !consumed
    });
    resolution.projectiles_consumed = hits.len();

    resolution
}

/// Whether any asteroid overlaps the player. Always false once the player is
/// dead.
pub fn player_hit(player: &Player, asteroids: &[Asteroid], shrink: f32) -> bool {
    if !player.alive {
        return false;
    }
    let radius = player.collision_radius(shrink);
    asteroids
        .iter()
        .any(|a| circles_overlap(player.pos, radius, a.pos, a.collision_radius(shrink)))
}
