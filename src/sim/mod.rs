//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies
//!
//! The only outside influence is the [`SharedInput`](crate::SharedInput)
//! record, read once per tick.

pub mod asteroid;
pub mod bounds;
pub mod collision;
pub mod entity;
pub mod player;
pub mod population;
pub mod projectile;
pub mod state;
pub mod tick;

pub use asteroid::{Asteroid, AsteroidStep, SizeClass};
pub use bounds::{Rect, circles_overlap, rotated_half_extents, wrap_horizontal, wrap_vertical};
pub use collision::{ProjectileHit, Resolution, player_hit, projectile_asteroid_hits, resolve_projectile_hits};
pub use entity::{Body, EntityView};
pub use player::Player;
pub use population::{AsteroidField, Destroyed, Permit, PopulationLimit};
pub use projectile::Projectile;
pub use state::{DestroyCause, GameEvent, GamePhase, GameState, SpawnOrigin};
pub use tick::{TickInput, tick};
