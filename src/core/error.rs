use thiserror::Error;

use crate::core::types::StateId;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Cell out of bounds: ({0}, {1})")]
    OutOfBounds(u32, u32),

    #[error("State not found: {0:?}")]
    StateNotFound(StateId),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported snapshot version: {0}")]
    SnapshotVersion(u32),

    #[error("Malformed snapshot: {0}")]
    Snapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;
