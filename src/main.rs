//! Asteroids headless entry point
//!
//! Runs one session at the fixed tick rate with a scripted pilot feeding the
//! input bridge, then shuts the bridge down and reports the score.
//!
//! Usage: `asteroids [seconds] [seed]`

use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use asteroids::sim::{GameEvent, GameState, TickInput, tick};
use asteroids::{Command, InputBridge, InputError, Settings};

const SETTINGS_FILE: &str = "asteroids.json";
const DEFAULT_SECONDS: u64 = 30;

/// Key transitions for one tick of a simple repeating flight pattern
fn pilot(tick_index: u64) -> Vec<(Command, bool)> {
    let mut commands = Vec::new();
    match tick_index % 240 {
        0 => commands.push((Command::RotateLeft, true)),
        40 => commands.push((Command::RotateLeft, false)),
        60 => commands.push((Command::Thrust, true)),
        75 => commands.push((Command::Thrust, false)),
        120 => commands.push((Command::RotateRight, true)),
        150 => commands.push((Command::RotateRight, false)),
        _ => {}
    }
    if tick_index % 12 == 0 {
        commands.push((Command::Shoot, true));
    }
    commands
}

fn parse_args() -> (u64, u64) {
    let mut args = std::env::args().skip(1);
    let seconds = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_SECONDS);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random::<u64>);
    (seconds, seed)
}

/// Tick budget for a run, saturating for absurd durations
fn session_ticks(seconds: u64, tick_rate: u32) -> u64 {
    seconds.saturating_mul(u64::from(tick_rate))
}

fn run(seconds: u64, seed: u64) -> Result<u64, Box<dyn std::error::Error>> {
    let settings = Settings::load_or_default(Path::new(SETTINGS_FILE))?;
    let poll_timeout = Duration::from_millis(settings.input_poll_timeout_ms);
    let tick_duration = settings.tick_duration();
    let max_ticks = session_ticks(seconds, settings.tick_rate);

    let mut state = GameState::new(seed, settings, Default::default());
    let bridge = InputBridge::spawn_with_state(state.input.clone(), poll_timeout)?;
    log::info!("Running for up to {} s (seed {})", seconds, seed);

    let input = TickInput::default();
    let mut next_tick = Instant::now();
    for tick_index in 0..max_ticks {
        for (command, active) in pilot(tick_index) {
            // A dead consumer leaves the ship on its last-known controls
            bridge.enqueue_lossy(command, active);
        }

        tick(&mut state, &input);

        for event in state.drain_events() {
            match event {
                GameEvent::AsteroidDestroyed { id, size, cause, .. } => {
                    log::debug!("Asteroid {} ({:?}) destroyed: {:?}", id, size, cause);
                }
                GameEvent::GameOver { score } => {
                    log::info!("Ship destroyed, final score {}", score);
                }
                _ => {}
            }
        }
        if state.is_over() {
            break;
        }

        next_tick += tick_duration;
        let now = Instant::now();
        if next_tick > now {
            thread::sleep(next_tick - now);
        } else {
            // Fell behind; don't try to catch up
            next_tick = now;
        }
    }

    bridge.shutdown().map_err(|e: InputError| {
        log::error!("Input bridge did not shut down cleanly: {}", e);
        e
    })?;

    log::info!(
        "Session over after {} ticks: score {}, {} asteroids live",
        state.time_ticks,
        state.score,
        state.field.len()
    );
    Ok(state.score)
}

fn main() {
    env_logger::init();
    let (seconds, seed) = parse_args();
    log::info!("Asteroids (headless) starting...");

    match run(seconds, seed) {
        Ok(score) => println!("Score: {}", score),
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}
