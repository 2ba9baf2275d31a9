//! Game error types.
//!
//! Fallible game operations (persistence, config parsing, snapshot restore)
//! return `GameResult<T>`. Gameplay itself never fails: out-of-bounds bodies,
//! penalties and game-over are rules, not errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Reading or writing a save file failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON config document could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    /// A config parsed but holds a value the game cannot run with.
    #[error("invalid value for {field}: {message}")]
    InvalidConfig { field: &'static str, message: String },

    /// A save stream was readable but its contents are inconsistent.
    #[error("corrupt save data: {reason}")]
    CorruptSave {
        /// Human-readable description of what was wrong.
        reason: String,
    },

    /// An entity the game relies on was absent.
    #[error("required entity missing during '{context}'")]
    MissingEntity {
        /// Where the lookup occurred.
        context: &'static str,
    },

    /// A snapshot contained an entity tag this build does not know.
    #[error("unknown entity kind tag {0}")]
    UnknownEntityKind(u8),
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

impl GameError {
    pub fn corrupt(reason: impl Into<String>) -> Self {
        GameError::CorruptSave {
            reason: reason.into(),
        }
    }

    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        GameError::InvalidConfig {
            field,
            message: message.into(),
        }
    }
}
