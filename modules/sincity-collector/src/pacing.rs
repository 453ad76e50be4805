//! Outbound call pacing.
//!
//! A pacing policy is consulted before every provider call and told when each
//! call returns. [`MinIntervalGate`] enforces a fixed floor between the end of
//! one call and the start of the next, independent of how long the call took.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{sleep, Instant};
use tracing::debug;

#[async_trait]
pub trait PacingPolicy: Send {
    /// Suspend until the next call may be issued.
    async fn wait(&mut self);

    /// Record that the previous call has returned (successfully or not).
    fn record_completion(&mut self);
}

/// Minimum-interval gate. The first call is never delayed.
#[derive(Debug)]
pub struct MinIntervalGate {
    interval: Duration,
    last_completion: Option<Instant>,
}

impl MinIntervalGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_completion: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Time still to wait before the next call may start.
    pub fn remaining(&self) -> Duration {
        match self.last_completion {
            Some(prev) => self.interval.saturating_sub(prev.elapsed()),
            None => Duration::ZERO,
        }
    }
}

#[async_trait]
impl PacingPolicy for MinIntervalGate {
    async fn wait(&mut self) {
        let remaining = self.remaining();
        if !remaining.is_zero() {
            debug!(wait_ms = remaining.as_millis() as u64, "Pacing before next search");
            sleep(remaining).await;
        }
    }

    fn record_completion(&mut self) {
        self.last_completion = Some(Instant::now());
    }
}
