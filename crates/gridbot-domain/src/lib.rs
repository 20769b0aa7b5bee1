//! # gridbot Domain Layer
//!
//! A robot on a 3×3 grid, driven by a queue of moves.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/     - Position, Direction, Grid, Session            ││
//! │  │  repository/- SessionRepository port                        ││
//! │  │  service/   - MoveQueueProcessor                            ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Golden Rule
//!
//! **This crate has ZERO external dependencies.**
//!
//! Sleeping, storing and serving are adapter concerns. Everything here is
//! plain data and pure functions over it.

pub mod model;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use model::{
    direction::{Direction, ParseDirectionError, TimeCost},
    grid::{Cell, Grid},
    position::{Position, GRID_SIZE},
    session::{Session, SessionId},
};

pub use repository::session_repository::{RepositoryError, SessionRepository};

pub use service::move_queue::{
    process_queue, residual_queue, AppliedMove, MoveQueueProcessor, PassOutcome, ProcessingPass,
    Step,
};
