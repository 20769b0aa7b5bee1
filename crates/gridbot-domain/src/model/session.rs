//! Session - One independent game
//!
//! A Session is an Entity: its grid, position and queue change over time,
//! but it stays the "same" session for as long as its id lives.

use super::direction::Direction;
use super::grid::Grid;
use super::position::Position;
use crate::service::move_queue::PassOutcome;

/// Opaque session identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for SessionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A robot, its board and the moves it has yet to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: SessionId,
    grid: Grid,
    position: Position,
    moves: Vec<Direction>,
}

impl Session {
    /// Fresh session: robot at the origin, nothing queued
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            grid: Grid::with_robot_at(Position::ORIGIN),
            position: Position::ORIGIN,
            moves: Vec::new(),
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn pending_moves(&self) -> &[Direction] {
        &self.moves
    }

    // ========== Mutations ==========

    /// Append a move to the back of the queue
    pub fn enqueue(&mut self, direction: Direction) {
        self.moves.push(direction);
    }

    /// Replace state with the result of a processing pass.
    ///
    /// The queue becomes the pass's residual queue.
    pub fn apply_pass(&mut self, outcome: &PassOutcome) {
        debug_assert_eq!(outcome.grid.robot_count(), 1);
        debug_assert_eq!(outcome.grid.robot_position(), Some(outcome.position));
        self.grid = outcome.grid;
        self.position = outcome.position;
        self.moves = outcome.residual_queue.clone();
    }
}
