//! TokioActuationClock - Real-time actuation delays

use std::time::Duration;

use async_trait::async_trait;
use gridbot_domain::{Direction, TimeCost};
use gridbot_usecase::ActuationClock;

/// Sleeps `unit × cost` on the tokio timer for every applied move
#[derive(Debug, Clone, Copy)]
pub struct TokioActuationClock {
    unit: Duration,
}

impl TokioActuationClock {
    /// `unit` is the wall time of one cost unit
    pub fn new(unit: Duration) -> Self {
        Self { unit }
    }

    /// Wall time for a move of the given cost
    pub fn delay_for(&self, cost: TimeCost) -> Duration {
        self.unit.saturating_mul(cost)
    }
}

impl Default for TokioActuationClock {
    /// One second per unit
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

#[async_trait]
impl ActuationClock for TokioActuationClock {
    async fn actuate(&self, _direction: Direction, cost: TimeCost) {
        let delay = self.delay_for(cost);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
