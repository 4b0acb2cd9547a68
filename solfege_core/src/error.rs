use std::path::PathBuf;

use thiserror::Error;

/// Failures of the key-value backend behind the stats store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage rejected write: {0}")]
    WriteFailure(String),
}

/// Degradation reasons of the stats store. None of these reach the player;
/// the store logs them and keeps going with whatever it has in memory.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("persisted history unavailable: {0}")]
    PersistenceUnavailable(#[source] StorageError),

    #[error("failed to persist history: {0}")]
    PersistenceWriteFailure(#[source] StorageError),

    #[error("persisted history is malformed: {0}")]
    MalformedPersistedData(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}
