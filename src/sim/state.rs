//! Session state and gameplay events
//!
//! Everything a running game owns lives here: the seeded RNG, score, phase,
//! the entities and the shared input record the bridge writes into.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::asteroid::SizeClass;
use super::bounds::Rect;
use super::entity::EntityView;
use super::player::Player;
use super::population::AsteroidField;
use super::projectile::Projectile;
use crate::input::SharedInput;
use crate::settings::Settings;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player was hit; terminal
    GameOver,
}

/// How an asteroid came to exist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnOrigin {
    /// Part of the starting mix
    Seed,
    /// Timed edge spawn
    Periodic,
    /// Fragment of a destroyed parent
    Split,
}

/// Why an asteroid was removed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestroyCause {
    Shot,
    /// Drifted off the top or bottom edge
    LeftScreen,
}

/// Gameplay events for collaborators (sound, effects, UI)
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    ProjectileFired {
        position: Vec2,
        angle: f32,
    },
    AsteroidSpawned {
        id: u32,
        size: SizeClass,
        origin: SpawnOrigin,
    },
    AsteroidDestroyed {
        id: u32,
        size: SizeClass,
        position: Vec2,
        cause: DestroyCause,
        /// Fragment ids spawned in its place
        children: Vec<u32>,
    },
    GameOver {
        score: u64,
    },
}

/// Complete state of one session
#[derive(Debug)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub settings: Settings,
    /// Visible play area
    pub screen: Rect,
    pub phase: GamePhase,
    pub score: u64,
    /// Simulation ticks while playing
    pub time_ticks: u64,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub field: AsteroidField,
    /// Written by the input bridge, read once per tick by the player
    pub input: SharedInput,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Start a session: player centered at rest, starting asteroids seeded
    pub fn new(seed: u64, settings: Settings, input: SharedInput) -> Self {
        let screen = Rect::screen(settings.screen_width, settings.screen_height);
        let player = Player::new(screen.center, settings.player.clone());
        let field = AsteroidField::new(settings.asteroids.clone());

        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            settings,
            screen,
            phase: GamePhase::Playing,
            score: 0,
            time_ticks: 0,
            player,
            projectiles: Vec::new(),
            field,
            input,
            events: Vec::new(),
        };

        let seeded = state.field.seed_initial(&state.screen, &mut state.rng);
        for id in seeded {
            state.record_spawn(id, SpawnOrigin::Seed);
        }
        log::info!(
            "New session (seed {}): {} asteroids, capacity {}",
            seed,
            state.field.len(),
            state.field.limit().capacity()
        );

        state
    }

    /// Session with default settings and a fresh input record
    pub fn with_defaults(seed: u64) -> Self {
        Self::new(seed, Settings::default(), SharedInput::new())
    }

    /// Every entity, player first, then projectiles, then asteroids
    pub fn entities(&self) -> impl Iterator<Item = EntityView<'_>> {
        std::iter::once(EntityView::Player(&self.player))
            .chain(self.projectiles.iter().map(EntityView::Projectile))
            .chain(self.field.asteroids().iter().map(EntityView::Asteroid))
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub(crate) fn record_spawn(&mut self, id: u32, origin: SpawnOrigin) {
        if let Some(size) = self.field.get(id).map(|a| a.size) {
            self.push_event(GameEvent::AsteroidSpawned { id, size, origin });
        }
    }
}
