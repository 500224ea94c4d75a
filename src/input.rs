//! Input bridge between the event source and the simulation
//!
//! Key events arrive as discrete `(command, active)` pairs on a FIFO queue.
//! A background consumer folds them into a mutex-guarded [`InputState`] that
//! the simulation snapshots once per tick. Held keys coalesce (only the latest
//! state is visible at a read); the shoot request is edge-triggered and stays
//! set until the next read clears it.

use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{self, Receiver, RecvTimeoutError, Sender};

use crate::error::InputError;

/// A player command produced by the event source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    RotateLeft,
    RotateRight,
    Thrust,
    /// Fire once; only key-down events matter
    Shoot,
}

impl Command {
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::RotateLeft => "rotate_left",
            Command::RotateRight => "rotate_right",
            Command::Thrust => "thrust_on",
            Command::Shoot => "shoot_request",
        }
    }
}

impl FromStr for Command {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rotate_left" => Ok(Command::RotateLeft),
            "rotate_right" => Ok(Command::RotateRight),
            "thrust_on" => Ok(Command::Thrust),
            "shoot_request" => Ok(Command::Shoot),
            other => Err(InputError::UnknownCommand(other.to_string())),
        }
    }
}

/// Continuously queryable control state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust_on: bool,
    /// Edge-triggered: set by a key-down, cleared only by the reader
    pub shoot_request: bool,
}

impl InputState {
    /// Fold one queued command into the state
    pub fn apply(&mut self, command: Command, active: bool) {
        match command {
            Command::RotateLeft => self.rotate_left = active,
            Command::RotateRight => self.rotate_right = active,
            Command::Thrust => self.thrust_on = active,
            Command::Shoot => {
                if active {
                    self.shoot_request = true;
                }
            }
        }
    }
}

/// Cloneable handle to the mutex-guarded input state
#[derive(Debug, Clone, Default)]
pub struct SharedInput {
    inner: Arc<Mutex<InputState>>,
}

impl SharedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a command under the lock (consumer side)
    pub fn apply(&self, command: Command, active: bool) -> Result<(), InputError> {
        let mut state = self.inner.lock().map_err(|_| InputError::Poisoned)?;
        state.apply(command, active);
        Ok(())
    }

    /// Snapshot all fields and clear the shoot request, atomically.
    ///
    /// Returns the values as they were before the reset. A poisoned lock is
    /// recovered so the simulation keeps running on the last-known state.
    pub fn read_and_consume_shoot(&self) -> InputState {
        let mut state = self.lock_recovering();
        let snapshot = *state;
        state.shoot_request = false;
        snapshot
    }

    /// Current state without consuming the shoot request
    pub fn peek(&self) -> InputState {
        *self.lock_recovering()
    }

    fn lock_recovering(&self) -> MutexGuard<'_, InputState> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            log::warn!("Input state lock poisoned, continuing with last-known state");
            poisoned.into_inner()
        })
    }
}

type QueuedCommand = (Command, bool);

/// Producer handle plus the background consumer thread
pub struct InputBridge {
    sender: Option<Sender<QueuedCommand>>,
    shared: SharedInput,
    shutdown: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
    /// Set once an enqueue found the consumer gone
    degraded: AtomicBool,
}

impl InputBridge {
    /// Start the consumer thread with a fresh shared state
    pub fn spawn(poll_timeout: Duration) -> Result<Self, InputError> {
        Self::spawn_with_state(SharedInput::new(), poll_timeout)
    }

    /// Start the consumer thread writing into an existing shared state
    pub fn spawn_with_state(shared: SharedInput, poll_timeout: Duration) -> Result<Self, InputError> {
        let (sender, receiver) = channel::unbounded();
        let shutdown = Arc::new(AtomicBool::new(false));

        let worker = {
            let shared = shared.clone();
            let shutdown = Arc::clone(&shutdown);
            thread::Builder::new()
                .name("input".into())
                .spawn(move || consume(receiver, shared, shutdown, poll_timeout))
                .map_err(InputError::Spawn)?
        };

        Ok(Self {
            sender: Some(sender),
            shared,
            shutdown,
            worker: Some(worker),
            degraded: AtomicBool::new(false),
        })
    }

    /// Queue a command. Never blocks.
    pub fn enqueue(&self, command: Command, active: bool) -> Result<(), InputError> {
        let sender = self.sender.as_ref().ok_or(InputError::Closed)?;
        sender
            .send((command, active))
            .map_err(|_| InputError::Closed)
    }

    /// Queue a command, tolerating a dead consumer.
    ///
    /// Returns false if the command was dropped. The first drop is logged; the
    /// simulation keeps running on the last-known input state.
    pub fn enqueue_lossy(&self, command: Command, active: bool) -> bool {
        match self.enqueue(command, active) {
            Ok(()) => true,
            Err(e) => {
                if !self.degraded.swap(true, Ordering::AcqRel) {
                    log::warn!("Input unavailable ({e}), continuing with last-known state");
                }
                false
            }
        }
    }

    /// Whether a command has been dropped because the consumer stopped
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Acquire)
    }

    /// Queue a command given by name (`rotate_left`, `thrust_on`, ...)
    pub fn enqueue_named(&self, name: &str, active: bool) -> Result<(), InputError> {
        self.enqueue(name.parse()?, active)
    }

    /// Handle for the simulation side
    pub fn shared(&self) -> SharedInput {
        self.shared.clone()
    }

    /// Whether the consumer thread is still running
    pub fn is_running(&self) -> bool {
        self.worker.as_ref().is_some_and(|w| !w.is_finished())
    }

    /// Signal shutdown, let the consumer drain the queue, then join it
    pub fn shutdown(mut self) -> Result<(), InputError> {
        self.stop()
    }

    fn stop(&mut self) -> Result<(), InputError> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };
        log::info!("Signaling input thread to stop");
        self.shutdown.store(true, Ordering::Release);
        // Closing the channel lets the consumer exit as soon as the backlog
        // is applied instead of waiting for its next timeout.
        self.sender = None;
        worker.join().map_err(|_| InputError::WorkerPanicked)?;
        log::info!("Input thread joined");
        Ok(())
    }
}

impl Drop for InputBridge {
    fn drop(&mut self) {
        if let Err(e) = self.stop() {
            log::error!("Input bridge shutdown failed: {e}");
        }
    }
}

/// Consumer loop: apply commands in FIFO order until shutdown is signaled and
/// the queue is empty.
fn consume(
    receiver: Receiver<QueuedCommand>,
    shared: SharedInput,
    shutdown: Arc<AtomicBool>,
    poll_timeout: Duration,
) {
    log::info!("Input thread started");
    loop {
        match receiver.recv_timeout(poll_timeout) {
            Ok((command, active)) => {
                if let Err(e) = shared.apply(command, active) {
                    log::error!("Input thread error: {e}");
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {
                if shutdown.load(Ordering::Acquire) {
                    drain(&receiver, &shared);
                    break;
                }
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    log::info!("Input thread stopped");
}

/// Apply whatever is still queued
fn drain(receiver: &Receiver<QueuedCommand>, shared: &SharedInput) {
    for (command, active) in receiver.try_iter() {
        if let Err(e) = shared.apply(command, active) {
            log::error!("Input thread error while draining: {e}");
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_names_round_trip() {
        for command in [
            Command::RotateLeft,
            Command::RotateRight,
            Command::Thrust,
            Command::Shoot,
        ] {
            assert_eq!(command.as_str().parse::<Command>().unwrap(), command);
        }
        assert!(matches!(
            "hyperspace".parse::<Command>(),
            Err(InputError::UnknownCommand(name)) if name == "hyperspace"
        ));
    }

    #[test]
    fn test_held_keys_overwrite() {
        let mut state = InputState::default();
        state.apply(Command::RotateLeft, true);
        state.apply(Command::Thrust, true);
        assert!(state.rotate_left && state.thrust_on);

        state.apply(Command::RotateLeft, false);
        assert!(!state.rotate_left);
        assert!(state.thrust_on);
    }

    #[test]
    fn test_shoot_release_does_not_clear_request() {
        let mut state = InputState::default();
        state.apply(Command::Shoot, true);
        state.apply(Command::Shoot, false);
        assert!(state.shoot_request);
    }

    #[test]
    fn test_read_consumes_shoot_once() {
        let shared = SharedInput::new();
        shared.apply(Command::Shoot, true).unwrap();
        shared.apply(Command::RotateRight, true).unwrap();

        let first = shared.read_and_consume_shoot();
        assert!(first.shoot_request);
        assert!(first.rotate_right);

        let second = shared.read_and_consume_shoot();
        assert!(!second.shoot_request);
        assert!(second.rotate_right, "held keys survive the read");
    }

    fn poison(shared: &SharedInput) {
        let poisoner = shared.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.lock().unwrap();
            panic!("poison the lock");
        })
        .join();
    }

    #[test]
    fn test_faulted_consumer_degrades_without_stopping_session() {
        use crate::sim::{GamePhase, GameState, TickInput, tick};

        let mut state = GameState::with_defaults(21);
        state.input.apply(Command::RotateLeft, true).unwrap();
        poison(&state.input);

        let bridge = InputBridge::spawn_with_state(state.input.clone(), Duration::from_millis(10)).unwrap();
        // The consumer fails applying this and exits
        assert!(bridge.enqueue_lossy(Command::Thrust, true));
        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        while bridge.is_running() {
            assert!(std::time::Instant::now() < deadline, "consumer never stopped");
            std::thread::sleep(Duration::from_millis(1));
        }

        assert!(matches!(bridge.enqueue(Command::Shoot, true), Err(InputError::Closed)));
        assert!(!bridge.is_degraded());
        for _ in 0..3 {
            assert!(!bridge.enqueue_lossy(Command::Shoot, true));
            tick(&mut state, &TickInput::default());
        }
        assert!(bridge.is_degraded());
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.time_ticks, 3);
        // Last-known state still steers the ship
        assert!((state.player.angle - 13.5).abs() < 1e-4);
        bridge.shutdown().unwrap();
    }

    #[test]
    fn test_poisoned_lock_reads_last_known_state() {
        let shared = SharedInput::new();
        shared.apply(Command::Thrust, true).unwrap();

        poison(&shared);

        assert!(matches!(
            shared.apply(Command::Thrust, false),
            Err(InputError::Poisoned)
        ));
        assert!(shared.read_and_consume_shoot().thrust_on);
    }
}
