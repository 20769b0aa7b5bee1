//! Error types for gridbot use cases

use gridbot_domain::{ParseDirectionError, RepositoryError};
use thiserror::Error;

/// Errors surfaced to callers of [`crate::GameService`]
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Session not found: {id}")]
    SessionNotFound { id: String },

    #[error("Invalid move: {value:?}")]
    InvalidMoveValue { value: String },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<ParseDirectionError> for GameError {
    fn from(err: ParseDirectionError) -> Self {
        GameError::InvalidMoveValue { value: err.value }
    }
}

pub type Result<T> = std::result::Result<T, GameError>;
