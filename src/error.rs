//! Error types.  The simulation itself never fails; only loading a
//! configuration can.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid level {number}: {reason}")]
    InvalidLevel { number: usize, reason: String },

    #[error("Config must define at least one level")]
    NoLevels,

    #[error("Tick rate must be positive, got {0}")]
    InvalidTickRate(f32),
}

pub type Result<T> = std::result::Result<T, GameError>;
