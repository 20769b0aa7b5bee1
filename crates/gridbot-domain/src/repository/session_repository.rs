//! Session Repository - Abstract storage for Sessions
//!
//! The store owns identity generation and session lifecycle.
//! Sessions live only as long as the process does.

use crate::model::session::{Session, SessionId};

/// Errors that can occur during repository operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Failed to read or write the store
    PersistenceError { message: String },
}

impl core::fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RepositoryError::PersistenceError { message } => {
                write!(f, "Persistence error: {}", message)
            }
        }
    }
}

impl std::error::Error for RepositoryError {}

/// Session Repository Trait
///
/// This is a PORT in hexagonal architecture.
/// Methods take `&self` so one store can be shared between request
/// handlers; implementations bring their own interior locking.
pub trait SessionRepository: Send + Sync {
    /// Allocate a fresh, unused session id
    fn next_identity(&self) -> SessionId;

    /// Save a session (create or update)
    fn save(&self, session: &Session) -> Result<(), RepositoryError>;

    /// Find a session by ID
    fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError>;

    /// Remove a session. Returns whether it existed.
    fn delete(&self, id: &SessionId) -> Result<bool, RepositoryError>;

    /// Check if a session exists
    fn exists(&self, id: &SessionId) -> Result<bool, RepositoryError> {
        Ok(self.find_by_id(id)?.is_some())
    }
}
