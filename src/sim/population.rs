//! Asteroid population control
//!
//! [`PopulationLimit`] is a non-blocking counting limit: every live asteroid
//! owns one [`Permit`], and dropping the permit returns the unit. Acquisition
//! never waits; callers simply skip the spawn when the limit is exhausted.
//!
//! [`AsteroidField`] owns the live asteroids, the limit they were allocated
//! from, and the periodic spawn timer.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use glam::Vec2;
use rand::Rng;

use super::asteroid::{Asteroid, AsteroidStep, SizeClass};
use super::bounds::Rect;
use crate::settings::AsteroidTuning;

#[derive(Debug)]
struct LimitInner {
    capacity: usize,
    in_use: AtomicUsize,
}

/// Bounded counter capping simultaneously live asteroids
#[derive(Debug, Clone)]
pub struct PopulationLimit {
    inner: Arc<LimitInner>,
}

impl PopulationLimit {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: Arc::new(LimitInner {
                capacity,
                in_use: AtomicUsize::new(0),
            }),
        }
    }

    /// Take one unit if any is free. Never blocks.
    pub fn try_acquire(&self) -> Option<Permit> {
        let mut current = self.inner.in_use.load(Ordering::Acquire);
        loop {
            if current >= self.inner.capacity {
                return None;
            }
            match self.inner.in_use.compare_exchange_weak(
                current,
                current + 1,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => {
                    return Some(Permit {
                        inner: Arc::clone(&self.inner),
                    });
                }
                Err(actual) => current = actual,
            }
        }
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }

    /// Units currently held by live permits
    pub fn outstanding(&self) -> usize {
        self.inner.in_use.load(Ordering::Acquire)
    }

    pub fn available(&self) -> usize {
        self.capacity().saturating_sub(self.outstanding())
    }
}

/// One unit of a [`PopulationLimit`], returned on drop
#[derive(Debug)]
pub struct Permit {
    inner: Arc<LimitInner>,
}

impl Drop for Permit {
    fn drop(&mut self) {
        self.inner.in_use.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Summary of a destroyed asteroid
#[derive(Debug, Clone, PartialEq)]
pub struct Destroyed {
    pub id: u32,
    pub size: SizeClass,
    /// Last position before removal
    pub position: Vec2,
    /// Ids of the fragments spawned in its place
    pub children: Vec<u32>,
}

/// The live asteroid set and its spawn control
#[derive(Debug)]
pub struct AsteroidField {
    limit: PopulationLimit,
    /// Kept in spawn order so iteration is deterministic
    asteroids: Vec<Asteroid>,
    spawn_timer: u32,
    next_id: u32,
    tuning: AsteroidTuning,
}

impl AsteroidField {
    pub fn new(tuning: AsteroidTuning) -> Self {
        Self {
            limit: PopulationLimit::new(tuning.capacity),
            asteroids: Vec::new(),
            spawn_timer: 0,
            next_id: 1,
            tuning,
        }
    }

    pub fn limit(&self) -> &PopulationLimit {
        &self.limit
    }

    pub fn tuning(&self) -> &AsteroidTuning {
        &self.tuning
    }

    pub fn asteroids(&self) -> &[Asteroid] {
        &self.asteroids
    }

    pub fn len(&self) -> usize {
        self.asteroids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asteroids.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Asteroid> {
        self.asteroids.iter().find(|a| a.id == id)
    }

    pub fn get_mut(&mut self, id: u32) -> Option<&mut Asteroid> {
        self.asteroids.iter_mut().find(|a| a.id == id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.get(id).is_some()
    }

    /// Ticks since the last periodic spawn attempt
    pub fn spawn_timer(&self) -> u32 {
        self.spawn_timer
    }

    /// Spawn one asteroid if the limit has room. Returns its id.
    pub fn try_spawn(&mut self, size: SizeClass, pos: Vec2, rng: &mut impl Rng) -> Option<u32> {
        let permit = self.limit.try_acquire()?;
        let id = self.next_id;
        self.next_id += 1;
        self.asteroids.push(Asteroid::new(id, size, pos, permit, rng));
        log::debug!("Spawned {:?} asteroid {} at ({:.0}, {:.0})", size, id, pos.x, pos.y);
        Some(id)
    }

    /// Random spawn point: a top/bottom edge or just outside the left/right
    /// edge, with the other coordinate uniform across the screen
    pub fn edge_spawn_position(&self, screen: &Rect, rng: &mut impl Rng) -> Vec2 {
        if rng.random_bool(0.5) {
            let y = if rng.random_bool(0.5) { screen.top() } else { screen.bottom() };
            let x = rng.random_range(screen.left()..screen.right());
            Vec2::new(x, y)
        } else {
            let margin = self.tuning.spawn_margin;
            let x = if rng.random_bool(0.5) {
                screen.left() - margin
            } else {
                screen.right() + margin
            };
            let y = rng.random_range(screen.top()..screen.bottom());
            Vec2::new(x, y)
        }
    }

    /// Spawn the configured starting mix in order.
    ///
    /// Stops entirely at the first failed acquisition; later groups are not
    /// attempted. Returns the ids spawned, in order.
    pub fn seed_initial(&mut self, screen: &Rect, rng: &mut impl Rng) -> Vec<u32> {
        let mut spawned = Vec::new();
        let mix = self.tuning.initial_mix.clone();
        for group in mix {
            for _ in 0..group.count {
                let pos = self.edge_spawn_position(screen, rng);
                match self.try_spawn(group.size, pos, rng) {
                    Some(id) => spawned.push(id),
                    None => {
                        log::warn!(
                            "Population limit reached while seeding {:?} asteroids, stopping initial spawn",
                            group.size
                        );
                        return spawned;
                    }
                }
            }
        }
        log::info!("Seeded {} asteroids", spawned.len());
        spawned
    }

    /// Advance the spawn timer; once per `spawn_rate` ticks try to add one
    /// LARGE asteroid at the screen edge.
    pub fn spawn_periodic(&mut self, screen: &Rect, rng: &mut impl Rng) -> Option<u32> {
        self.spawn_timer += 1;
        if self.spawn_timer < self.tuning.spawn_rate {
            return None;
        }
        self.spawn_timer = 0;

        if self.limit.available() == 0 {
            log::trace!("Population full, skipping periodic spawn");
            return None;
        }
        let pos = self.edge_spawn_position(screen, rng);
        self.try_spawn(SizeClass::Large, pos, rng)
    }

    /// Remove an asteroid, returning its unit to the limit, and optionally
    /// split it into smaller fragments.
    ///
    /// Each fragment needs its own unit; the first failed acquisition ends the
    /// split. Unknown or already-destroyed ids are a no-op.
    pub fn destroy(&mut self, id: u32, spawn_children: bool, rng: &mut impl Rng) -> Option<Destroyed> {
        let index = self.asteroids.iter().position(|a| a.id == id)?;
        // Dropping the asteroid releases its permit
        let asteroid = self.asteroids.remove(index);
        let size = asteroid.size;
        let position = asteroid.pos;
        drop(asteroid);

        let mut children = Vec::new();
        if spawn_children && let Some(fragment) = size.fragment() {
            let jitter = self.tuning.split_jitter;
            for _ in 0..self.tuning.split_count(size) {
                let offset = Vec2::new(
                    rng.random_range(-jitter..=jitter) as f32,
                    rng.random_range(-jitter..=jitter) as f32,
                );
                match self.try_spawn(fragment, position + offset, rng) {
                    Some(child) => children.push(child),
                    None => break,
                }
            }
        }

        log::debug!(
            "Destroyed {:?} asteroid {} ({} fragments)",
            size,
            id,
            children.len()
        );
        Some(Destroyed {
            id,
            size,
            position,
            children,
        })
    }

    /// Update every asteroid; those that crossed the top or bottom edge are
    /// removed without splitting.
    pub fn update(&mut self, screen: &Rect) -> Vec<Destroyed> {
        let mut exited = Vec::new();
        self.asteroids.retain_mut(|asteroid| match asteroid.update(screen) {
            AsteroidStep::Drifting => true,
            AsteroidStep::LeftScreen => {
                exited.push(Destroyed {
                    id: asteroid.id,
                    size: asteroid.size,
                    position: asteroid.pos,
                    children: Vec::new(),
                });
                false
            }
        });
        exited
    }
}
