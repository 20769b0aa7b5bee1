//! Domain Services - Business logic that doesn't belong to a single entity
//!
//! The processor works on a session's data but never owns a session.

pub mod move_queue;
