//! Mutable timer bookkeeping shared with the countdown task

use std::time::Duration;

use tokio::time::Instant;

use super::TimerStatus;

/// Mutable countdown bookkeeping, guarded by a single mutex
///
/// `remaining` is authoritative only while the timer is paused or
/// finished. While the countdown is running it is stale: the live budget
/// is `remaining` minus the time elapsed since `started_at`.
#[derive(Debug, Clone)]
pub(crate) struct TimerState {
    /// Current lifecycle state
    pub status: TimerStatus,
    /// Instant of the most recent transition into running
    pub started_at: Option<Instant>,
    /// Countdown budget left as of the last state transition
    pub remaining: Duration,
}

impl TimerState {
    /// Create the inert pre-start state
    pub fn new() -> Self {
        Self {
            status: TimerStatus::Inert,
            started_at: None,
            remaining: Duration::ZERO,
        }
    }

    /// Time elapsed since the most recent transition into running
    pub fn elapsed(&self) -> Duration {
        self.started_at
            .map(|started| started.elapsed())
            .unwrap_or(Duration::ZERO)
    }

    /// Fold the elapsed running time into the remaining budget
    ///
    /// Saturates at zero so a late firing can never drive the budget
    /// negative.
    pub fn settle_remaining(&mut self) {
        self.remaining = self.remaining.saturating_sub(self.elapsed());
    }
}
