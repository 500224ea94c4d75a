//! Threaded input bridge tests.
//!
//! Every test goes through the real consumer thread. Assertions about the
//! final shared state are made after `shutdown()`, which drains the queue
//! before joining, so they do not depend on scheduling.

use std::time::{Duration, Instant};

use asteroids::{Command, InputBridge, InputError, SharedInput};

const POLL: Duration = Duration::from_millis(10);

/// Commands are applied in the order they were queued
#[test]
fn commands_apply_in_fifo_order() {
    let bridge = InputBridge::spawn(POLL).unwrap();
    let shared = bridge.shared();

    bridge.enqueue(Command::Thrust, true).unwrap();
    bridge.enqueue(Command::Thrust, false).unwrap();
    bridge.enqueue(Command::Thrust, true).unwrap();
    bridge.enqueue(Command::RotateLeft, true).unwrap();
    bridge.enqueue(Command::RotateLeft, false).unwrap();
    bridge.shutdown().unwrap();

    let state = shared.peek();
    assert!(state.thrust_on);
    assert!(!state.rotate_left);
    assert!(!state.rotate_right);
}

/// A large backlog is fully applied before the consumer exits
#[test]
fn shutdown_drains_backlog() {
    let bridge = InputBridge::spawn(POLL).unwrap();
    let shared = bridge.shared();

    for i in 0..10_000 {
        bridge.enqueue(Command::RotateRight, i % 2 == 0).unwrap();
    }
    // Last queued value is `false` (i = 9999); follow it with a distinct final write
    bridge.enqueue(Command::RotateRight, true).unwrap();
    bridge.shutdown().unwrap();

    assert!(shared.peek().rotate_right);
}

/// Shoot stays set until read, is seen exactly once, and is never cleared by a
/// release event
#[test]
fn shoot_is_edge_triggered_across_threads() {
    let bridge = InputBridge::spawn(POLL).unwrap();
    let shared = bridge.shared();

    bridge.enqueue(Command::Shoot, true).unwrap();
    bridge.enqueue(Command::Shoot, false).unwrap();
    bridge.shutdown().unwrap();

    assert!(shared.read_and_consume_shoot().shoot_request);
    assert!(!shared.read_and_consume_shoot().shoot_request);
}

/// Named commands use the event-source vocabulary
#[test]
fn named_commands() {
    let bridge = InputBridge::spawn(POLL).unwrap();
    let shared = bridge.shared();

    bridge.enqueue_named("rotate_left", true).unwrap();
    bridge.enqueue_named("thrust_on", true).unwrap();
    bridge.enqueue_named("shoot_request", true).unwrap();
    let err = bridge.enqueue_named("hyperspace", true).unwrap_err();
    assert!(matches!(err, InputError::UnknownCommand(ref name) if name == "hyperspace"));

    // A rejected name does not poison the bridge
    bridge.enqueue_named("rotate_right", true).unwrap();
    bridge.shutdown().unwrap();

    let state = shared.peek();
    assert!(state.rotate_left && state.rotate_right && state.thrust_on && state.shoot_request);
}

/// The consumer writes into a caller-provided record
#[test]
fn spawn_with_existing_state() {
    let shared = SharedInput::new();
    let bridge = InputBridge::spawn_with_state(shared.clone(), POLL).unwrap();
    bridge.enqueue(Command::Thrust, true).unwrap();

    // Observed while the consumer is still running
    let deadline = Instant::now() + Duration::from_secs(5);
    while !shared.peek().thrust_on {
        assert!(Instant::now() < deadline, "consumer never applied the command");
        std::thread::sleep(Duration::from_millis(1));
    }
    assert!(bridge.is_running());
    bridge.shutdown().unwrap();
}

/// Dropping a live bridge performs the same drain-then-join shutdown
#[test]
fn drop_shuts_down_cleanly() {
    let shared = SharedInput::new();
    {
        let bridge = InputBridge::spawn_with_state(shared.clone(), POLL).unwrap();
        bridge.enqueue(Command::RotateLeft, true).unwrap();
    }
    assert!(shared.peek().rotate_left);
}

/// A shutdown with nothing queued returns promptly
#[test]
fn idle_shutdown_is_prompt() {
    let bridge = InputBridge::spawn(Duration::from_millis(100)).unwrap();
    let start = Instant::now();
    bridge.shutdown().unwrap();
    assert!(start.elapsed() < Duration::from_secs(2));
}
