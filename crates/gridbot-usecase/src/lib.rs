//! # gridbot Use Case Layer
//!
//! Application-specific business rules.
//! This layer drives the domain's processing pass against a session store
//! and an actuation clock, both injected by the app.

pub use gridbot_domain;

pub mod clock;
pub mod error;
pub mod game_service;

pub use clock::ActuationClock;
pub use error::{GameError, Result};
pub use game_service::{GameService, ProcessReport, SessionSnapshot};
