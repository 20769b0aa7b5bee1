//! Actuation clock - How long a move takes
//!
//! This is an outbound PORT. Production waits in real time; tests record
//! the requested costs and return at once.

use async_trait::async_trait;
use gridbot_domain::{Direction, TimeCost};

/// Suspends a processing pass while the robot carries out a move
#[async_trait]
pub trait ActuationClock: Send + Sync {
    /// Wait out `cost` units for `direction`.
    ///
    /// Only the calling pass is suspended; other sessions keep running.
    async fn actuate(&self, direction: Direction, cost: TimeCost);
}
