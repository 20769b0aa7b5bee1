//! GameService - Everything a client can do with a session
//!
//! ```text
//! create ──► enqueue* ──► process ──► enqueue* ──► process ... ──► end
//!                 │                      │
//!                 └──── state / moves ◄──┘   (read at any time)
//! ```
//!
//! Writes to one session (enqueue, process, end) are serialized through a
//! per-session async lock. A processing pass holds that lock until the
//! last move's actuation time has elapsed. Different sessions never wait
//! on each other.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use gridbot_domain::{
    Direction, Grid, MoveQueueProcessor, Position, Session, SessionId, SessionRepository, Step,
    TimeCost,
};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

use crate::clock::ActuationClock;
use crate::error::{GameError, Result};

/// Grid and position of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub grid: Grid,
    pub position: Position,
}

/// What a processing pass did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessReport {
    pub moves_processed: usize,
    pub new_position: Position,
    pub invalid_moves: Vec<Direction>,
    /// Actuation time spent, in cost units
    pub time_cost: TimeCost,
}

/// One writer lock per live session
#[derive(Debug, Default)]
struct SessionLocks {
    locks: Mutex<HashMap<SessionId, Arc<AsyncMutex<()>>>>,
}

impl SessionLocks {
    fn handle(&self, id: &SessionId) -> Arc<AsyncMutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(id.clone()).or_default().clone()
    }

    fn forget(&self, id: &SessionId) {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// GameService - The session store's front door
///
/// Owns the injected store and clock. Share it behind an `Arc`.
pub struct GameService {
    repository: Arc<dyn SessionRepository>,
    clock: Arc<dyn ActuationClock>,
    processor: MoveQueueProcessor,
    locks: SessionLocks,
}

impl GameService {
    pub fn new(repository: Arc<dyn SessionRepository>, clock: Arc<dyn ActuationClock>) -> Self {
        Self {
            repository,
            clock,
            processor: MoveQueueProcessor::new(),
            locks: SessionLocks::default(),
        }
    }

    /// Start a new session: empty grid, robot at (0, 0), no moves
    pub fn create_session(&self) -> Result<SessionId> {
        let id = self.repository.next_identity();
        self.repository.save(&Session::new(id.clone()))?;
        info!(session_id = %id, "session created");
        Ok(id)
    }

    /// Current grid and position
    pub fn session_state(&self, id: &SessionId) -> Result<SessionSnapshot> {
        let session = self.load(id)?;
        Ok(SessionSnapshot {
            id: session.id().clone(),
            grid: session.grid(),
            position: session.position(),
        })
    }

    /// Moves waiting for the next pass, front first
    pub fn pending_moves(&self, id: &SessionId) -> Result<Vec<Direction>> {
        Ok(self.load(id)?.pending_moves().to_vec())
    }

    /// Parse `raw` as a move symbol and append it to the queue.
    ///
    /// An unknown session is reported before an unknown move. Neither check
    /// waits for a pass running on the session; only the append does.
    pub async fn enqueue_move(&self, id: &SessionId, raw: &str) -> Result<Direction> {
        if !self.repository.exists(id)? {
            return Err(not_found(id));
        }

        let direction: Direction = raw.parse().map_err(|err| {
            warn!(session_id = %id, value = raw, "rejected move");
            GameError::from(err)
        })?;

        let (_guard, mut session) = self.lock_session(id).await?;
        session.enqueue(direction);
        self.repository.save(&session)?;
        debug!(
            session_id = %id,
            direction = %direction,
            queued = session.pending_moves().len(),
            "move queued"
        );
        Ok(direction)
    }

    /// Run one processing pass over the whole queue.
    ///
    /// Returns once every applied move's actuation time has elapsed.
    pub async fn process_moves(&self, id: &SessionId) -> Result<ProcessReport> {
        let (_guard, mut session) = self.lock_session(id).await?;

        let mut pass = self.processor.begin(
            session.grid(),
            session.position(),
            session.pending_moves(),
        );
        for step in pass.by_ref() {
            match step {
                Step::Applied(applied) => {
                    debug!(
                        session_id = %id,
                        direction = %applied.direction,
                        from = %applied.from,
                        to = %applied.to,
                        cost = applied.cost,
                        "move applied"
                    );
                    self.clock.actuate(applied.direction, applied.cost).await;
                }
                Step::Rejected { direction, at } => {
                    debug!(session_id = %id, direction = %direction, at = %at, "move rejected");
                }
            }
        }

        let outcome = pass.finish();
        session.apply_pass(&outcome);
        self.repository.save(&session)?;

        info!(
            session_id = %id,
            processed = outcome.processed,
            invalid = outcome.invalid_moves.len(),
            position = %outcome.position,
            time_cost = outcome.total_cost,
            "processing pass complete"
        );

        Ok(ProcessReport {
            moves_processed: outcome.processed,
            new_position: outcome.position,
            invalid_moves: outcome.invalid_moves,
            time_cost: outcome.total_cost,
        })
    }

    /// Remove the session and everything in it
    pub async fn end_session(&self, id: &SessionId) -> Result<()> {
        let (_guard, _session) = self.lock_session(id).await?;

        if !self.repository.delete(id)? {
            return Err(not_found(id));
        }
        self.locks.forget(id);
        info!(session_id = %id, "session ended");
        Ok(())
    }

    fn load(&self, id: &SessionId) -> Result<Session> {
        self.repository
            .find_by_id(id)?
            .ok_or_else(|| not_found(id))
    }

    /// Take the session's writer lock, then read it.
    async fn lock_session(&self, id: &SessionId) -> Result<(OwnedMutexGuard<()>, Session)> {
        if !self.repository.exists(id)? {
            return Err(not_found(id));
        }

        let guard = self.locks.handle(id).lock_owned().await;

        // Ended while we were waiting
        match self.load(id) {
            Ok(session) => Ok((guard, session)),
            Err(err) => {
                self.locks.forget(id);
                Err(err)
            }
        }
    }
}

fn not_found(id: &SessionId) -> GameError {
    GameError::SessionNotFound { id: id.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gridbot_domain::RepositoryError;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    #[derive(Default)]
    struct InMemorySessionRepo {
        sessions: Mutex<HashMap<String, Session>>,
        next: AtomicU32,
    }

    impl SessionRepository for InMemorySessionRepo {
        fn next_identity(&self) -> SessionId {
            let n = self.next.fetch_add(1, Ordering::Relaxed);
            SessionId::new(format!("s-{:03}", n))
        }

        fn save(&self, session: &Session) -> std::result::Result<(), RepositoryError> {
            self.sessions
                .lock()
                .unwrap()
                .insert(session.id().as_str().to_string(), session.clone());
            Ok(())
        }

        fn find_by_id(&self, id: &SessionId) -> std::result::Result<Option<Session>, RepositoryError> {
            Ok(self.sessions.lock().unwrap().get(id.as_str()).cloned())
        }

        fn delete(&self, id: &SessionId) -> std::result::Result<bool, RepositoryError> {
            Ok(self.sessions.lock().unwrap().remove(id.as_str()).is_some())
        }
    }

    /// Records every actuation instead of sleeping
    #[derive(Default)]
    struct RecordingClock {
        actuations: Mutex<Vec<(Direction, TimeCost)>>,
    }

    impl RecordingClock {
        fn actuations(&self) -> Vec<(Direction, TimeCost)> {
            self.actuations.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ActuationClock for RecordingClock {
        async fn actuate(&self, direction: Direction, cost: TimeCost) {
            self.actuations.lock().unwrap().push((direction, cost));
            // Give other tasks a chance to interleave
            tokio::task::yield_now().await;
        }
    }

    /// Sleeps one second per cost unit on the tokio timer
    struct SleepingClock;

    #[async_trait]
    impl ActuationClock for SleepingClock {
        async fn actuate(&self, _direction: Direction, cost: TimeCost) {
            tokio::time::sleep(Duration::from_secs(cost.into())).await;
        }
    }

    fn timed_service() -> Arc<GameService> {
        Arc::new(GameService::new(
            Arc::new(InMemorySessionRepo::default()),
            Arc::new(SleepingClock),
        ))
    }

    async fn session_with_moves(service: &GameService, moves: &[&str]) -> SessionId {
        let id = service.create_session().unwrap();
        for raw in moves {
            service.enqueue_move(&id, raw).await.unwrap();
        }
        id
    }

    /// Start a pass in the background and let it reach its first actuation
    async fn start_pass(
        service: &Arc<GameService>,
        id: &SessionId,
    ) -> tokio::task::JoinHandle<Result<ProcessReport>> {
        let handle = tokio::spawn({
            let service = Arc::clone(service);
            let id = id.clone();
            async move { service.process_moves(&id).await }
        });
        tokio::time::sleep(Duration::from_millis(500)).await;
        handle
    }

    fn service() -> (GameService, Arc<RecordingClock>) {
        let clock = Arc::new(RecordingClock::default());
        let service = GameService::new(Arc::new(InMemorySessionRepo::default()), clock.clone());
        (service, clock)
    }

    fn pos(x: usize, y: usize) -> Position {
        Position::new(x, y).unwrap()
    }

    #[tokio::test]
    async fn test_create_session() {
        let (service, _) = service();
        let id = service.create_session().unwrap();

        let state = service.session_state(&id).unwrap();
        assert_eq!(state.id, id);
        assert_eq!(state.position, Position::ORIGIN);
        assert_eq!(state.grid.robot_position(), Some(Position::ORIGIN));
        assert!(service.pending_moves(&id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_enqueue_and_list() {
        let (service, _) = service();
        let id = service.create_session().unwrap();

        service.enqueue_move(&id, "R").await.unwrap();
        service.enqueue_move(&id, "D").await.unwrap();

        assert_eq!(
            service.pending_moves(&id).unwrap(),
            vec![Direction::Right, Direction::Down]
        );
    }

    #[tokio::test]
    async fn test_enqueue_rejects_unknown_move() {
        let (service, _) = service();
        let id = service.create_session().unwrap();

        let err = service.enqueue_move(&id, "X").await.unwrap_err();
        assert!(matches!(err, GameError::InvalidMoveValue { value } if value == "X"));
        assert!(service.pending_moves(&id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_session_checked_before_move() {
        let (service, _) = service();
        let err = service
            .enqueue_move(&SessionId::new("missing"), "X")
            .await
            .unwrap_err();
        assert!(matches!(err, GameError::SessionNotFound { .. }));
    }

    #[tokio::test]
    async fn test_process_applies_moves_and_actuates() {
        let (service, clock) = service();
        let id = service.create_session().unwrap();
        service.enqueue_move(&id, "D").await.unwrap();
        service.enqueue_move(&id, "R").await.unwrap();

        let report = service.process_moves(&id).await.unwrap();

        assert_eq!(report.moves_processed, 2);
        assert_eq!(report.new_position, pos(1, 1));
        assert!(report.invalid_moves.is_empty());
        assert_eq!(report.time_cost, 3);
        assert_eq!(
            clock.actuations(),
            vec![(Direction::Down, 2), (Direction::Right, 1)]
        );

        let state = service.session_state(&id).unwrap();
        assert_eq!(state.position, pos(1, 1));
        assert_eq!(state.grid.robot_position(), Some(pos(1, 1)));
        assert!(service.pending_moves(&id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejected_moves_are_not_actuated() {
        let (service, clock) = service();
        let id = service.create_session().unwrap();
        for raw in ["R", "U", "R"] {
            service.enqueue_move(&id, raw).await.unwrap();
        }

        let report = service.process_moves(&id).await.unwrap();

        assert_eq!(report.moves_processed, 2);
        assert_eq!(report.invalid_moves, vec![Direction::Up]);
        assert_eq!(report.new_position, pos(2, 0));
        assert_eq!(clock.actuations().len(), 2);
        assert!(service.pending_moves(&id).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_process_empty_queue() {
        let (service, clock) = service();
        let id = service.create_session().unwrap();

        let report = service.process_moves(&id).await.unwrap();

        assert_eq!(report.moves_processed, 0);
        assert_eq!(report.new_position, Position::ORIGIN);
        assert!(report.invalid_moves.is_empty());
        assert!(clock.actuations().is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_passes_are_serialized() {
        let (service, _) = service();
        let id = service.create_session().unwrap();
        service.enqueue_move(&id, "D").await.unwrap();
        service.enqueue_move(&id, "D").await.unwrap();

        let (first, second) = tokio::join!(service.process_moves(&id), service.process_moves(&id));
        let (first, second) = (first.unwrap(), second.unwrap());

        // One pass sees both moves, the other sees an empty queue
        assert_eq!(first.moves_processed + second.moves_processed, 2);
        assert_eq!(service.session_state(&id).unwrap().position, pos(0, 2));
    }

    #[tokio::test]
    async fn test_end_session() {
        let (service, _) = service();
        let id = service.create_session().unwrap();
        service.enqueue_move(&id, "D").await.unwrap();

        service.end_session(&id).await.unwrap();

        assert!(matches!(
            service.session_state(&id),
            Err(GameError::SessionNotFound { .. })
        ));
        assert!(matches!(
            service.pending_moves(&id),
            Err(GameError::SessionNotFound { .. })
        ));
        assert!(matches!(
            service.end_session(&id).await,
            Err(GameError::SessionNotFound { .. })
        ));
        assert_eq!(service.locks.len(), 0);
    }

    #[tokio::test]
    async fn test_sessions_are_independent() {
        let (service, _) = service();
        let a = service.create_session().unwrap();
        let b = service.create_session().unwrap();
        assert_ne!(a, b);

        service.enqueue_move(&a, "D").await.unwrap();
        service.process_moves(&a).await.unwrap();

        assert_eq!(service.session_state(&a).unwrap().position, pos(0, 1));
        assert_eq!(service.session_state(&b).unwrap().position, Position::ORIGIN);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_move_does_not_wait_for_running_pass() {
        let service = timed_service();
        let id = session_with_moves(&service, &["D", "D", "R", "R"]).await;
        let pass = start_pass(&service, &id).await;

        let start = Instant::now();
        let err = service.enqueue_move(&id, "X").await.unwrap_err();

        assert!(matches!(err, GameError::InvalidMoveValue { .. }));
        assert_eq!(start.elapsed(), Duration::ZERO);

        let report = pass.await.unwrap().unwrap();
        assert_eq!(report.time_cost, 6);
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_move_waits_for_running_pass() {
        let service = timed_service();
        let id = session_with_moves(&service, &["D", "R"]).await;
        let pass = start_pass(&service, &id).await;

        service.enqueue_move(&id, "U").await.unwrap();

        // Appended after the pass saved its result
        let report = pass.await.unwrap().unwrap();
        assert_eq!(report.moves_processed, 2);
        assert_eq!(service.pending_moves(&id).unwrap(), vec![Direction::Up]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pass_delay_blocks_only_its_own_session() {
        let service = timed_service();
        let a = session_with_moves(&service, &["D", "D", "R", "R"]).await;
        let b = session_with_moves(&service, &["R"]).await;
        let long_pass = start_pass(&service, &a).await;

        let start = Instant::now();
        let report = service.process_moves(&b).await.unwrap();
        let elapsed = start.elapsed();

        assert_eq!(report.new_position, pos(1, 0));
        assert!(elapsed >= Duration::from_secs(1));
        assert!(elapsed < Duration::from_secs(2));

        let long_report = long_pass.await.unwrap().unwrap();
        assert_eq!(long_report.new_position, pos(2, 2));
    }
}
