//! Error types
//!
//! The tick loop itself never fails; these cover setup (settings) and the
//! input plumbing around the simulation.

use std::path::PathBuf;

use thiserror::Error;

/// Failures loading, saving or validating [`crate::Settings`]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

/// Failures in the input bridge
#[derive(Debug, Error)]
pub enum InputError {
    /// Event source sent a command name the bridge does not know
    #[error("unknown input command `{0}`")]
    UnknownCommand(String),

    /// Consumer side is gone (bridge shut down or consumer thread exited)
    #[error("input bridge is closed")]
    Closed,

    #[error("failed to spawn input thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("input thread panicked")]
    WorkerPanicked,

    /// Shared input state lock was poisoned by a panicking holder
    #[error("shared input state is poisoned")]
    Poisoned,
}
