//! In-Memory Repository Implementations
//!
//! Sessions are kept in a process-local map and vanish on restart.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use gridbot_domain::model::session::{Session, SessionId};
use gridbot_domain::repository::session_repository::{RepositoryError, SessionRepository};
use uuid::Uuid;

/// In-memory Session Repository
///
/// Thread-safe implementation using RwLock. Ids are random UUIDv4 strings.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

fn read_lock_failed() -> RepositoryError {
    RepositoryError::PersistenceError {
        message: "Failed to acquire read lock".to_string(),
    }
}

fn write_lock_failed() -> RepositoryError {
    RepositoryError::PersistenceError {
        message: "Failed to acquire write lock".to_string(),
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn next_identity(&self) -> SessionId {
        SessionId::new(Uuid::new_v4().to_string())
    }

    fn save(&self, session: &Session) -> Result<(), RepositoryError> {
        let mut sessions = self.sessions.write().map_err(|_| write_lock_failed())?;
        sessions.insert(session.id().as_str().to_string(), session.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &SessionId) -> Result<Option<Session>, RepositoryError> {
        let sessions = self.sessions.read().map_err(|_| read_lock_failed())?;
        Ok(sessions.get(id.as_str()).cloned())
    }

    fn delete(&self, id: &SessionId) -> Result<bool, RepositoryError> {
        let mut sessions = self.sessions.write().map_err(|_| write_lock_failed())?;
        Ok(sessions.remove(id.as_str()).is_some())
    }

    fn exists(&self, id: &SessionId) -> Result<bool, RepositoryError> {
        let sessions = self.sessions.read().map_err(|_| read_lock_failed())?;
        Ok(sessions.contains_key(id.as_str()))
    }
}
