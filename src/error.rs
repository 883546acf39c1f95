use std::path::PathBuf;

use crate::game::{GameEvent, GamePhase};

/// Rejections raised by the game session. None of these are fatal: the
/// offending event is dropped and the session state is left untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GameError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{event} is not accepted during {phase}")]
    InvalidTransition { event: GameEvent, phase: GamePhase },

    #[error("throw {throw} of frame {frame} was already resolved")]
    DuplicateCompletion { frame: usize, throw: usize },
}

impl GameError {
    pub(crate) fn invalid_input(msg: impl Into<String>) -> Self {
        GameError::InvalidInput(msg.into())
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
