// Poll scheduler.
// Fires once immediately and then on a fixed period for the life of the app.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};

/// Shortest period accepted; tokio intervals cannot be zero.
const MIN_PERIOD: Duration = Duration::from_millis(100);

pub struct PollScheduler {
    interval: Interval,
}

impl PollScheduler {
    /// Must be called from within a tokio runtime.
    pub fn new(period: Duration) -> Self {
        let mut interval = tokio::time::interval(period.max(MIN_PERIOD));
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Self { interval }
    }

    pub fn period(&self) -> Duration {
        self.interval.period()
    }

    /// Wait for the next poll. The first call returns immediately.
    pub async fn tick(&mut self) -> Instant {
        self.interval.tick().await
    }
}
