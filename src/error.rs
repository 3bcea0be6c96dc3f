//! Error types for liftlog.

use std::path::PathBuf;

use thiserror::Error;

/// Rejected store operations.
///
/// A rejected operation leaves the store exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("No workout in progress")]
    NoActiveWorkout,

    #[error("Exercise index {index} out of range (workout has {len} exercises)")]
    ExerciseIndexOutOfRange { index: usize, len: usize },

    #[error("Set index {index} out of range (exercise has {len} sets, use {len} to append)")]
    SetIndexOutOfRange { index: usize, len: usize },
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] serde_json::Error),
}
