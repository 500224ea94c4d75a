//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::{player_hit, resolve_projectile_hits};
use super::population::Destroyed;
use super::state::{DestroyCause, GameEvent, GamePhase, GameState, SpawnOrigin};

/// Per-tick commands that are not part of the shared ship controls
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pause toggle
    pub pause: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                log::info!("Paused at tick {}", state.time_ticks);
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => {
                log::info!("Resumed at tick {}", state.time_ticks);
                state.phase = GamePhase::Playing;
            }
            GamePhase::GameOver => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        GamePhase::Playing => {}
    }

    state.time_ticks += 1;
    let screen = state.screen;

    // A projectile fired this tick starts moving next tick
    let fired = state.player.update(&state.input, &screen);
    state.projectiles.retain_mut(|p| p.update(&screen));
    if let Some(projectile) = fired {
        state.push_event(GameEvent::ProjectileFired {
            position: projectile.pos,
            angle: projectile.angle,
        });
        state.projectiles.push(projectile);
    }

    for exited in state.field.update(&screen) {
        record_destroyed(state, exited, DestroyCause::LeftScreen);
    }

    let resolution = resolve_projectile_hits(&mut state.projectiles, &mut state.field, &mut state.rng);
    state.score += resolution.score;
    for destroyed in resolution.destroyed {
        record_destroyed(state, destroyed, DestroyCause::Shot);
    }

    if player_hit(&state.player, state.field.asteroids(), state.settings.collision_shrink) {
        state.player.alive = false;
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over at tick {} with score {}",
            state.time_ticks,
            state.score
        );
        state.push_event(GameEvent::GameOver { score: state.score });
        return;
    }

    if let Some(id) = state.field.spawn_periodic(&screen, &mut state.rng) {
        state.record_spawn(id, SpawnOrigin::Periodic);
    }
}

fn record_destroyed(state: &mut GameState, destroyed: Destroyed, cause: DestroyCause) {
    for &child in &destroyed.children {
        state.record_spawn(child, SpawnOrigin::Split);
    }
    state.push_event(GameEvent::AsteroidDestroyed {
        id: destroyed.id,
        size: destroyed.size,
        position: destroyed.position,
        cause,
        children: destroyed.children,
    });
}
