//! Serializable point-in-time view of a countdown timer

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TimerStatus;

/// Point-in-time view of a countdown timer
///
/// Captured under the state lock, so the fields are mutually consistent.
/// Serializable so monitoring code can export timer state directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerSnapshot {
    /// Lifecycle state at capture time
    pub status: TimerStatus,
    /// Configured total countdown duration
    pub max_duration: Duration,
    /// Remaining budget as of the last state transition
    pub remaining: Duration,
    /// Whether the countdown was suspended
    pub paused: bool,
    /// Whether the countdown had completed
    pub finished: bool,
    /// Wall-clock time the snapshot was taken
    pub captured_at: DateTime<Utc>,
}

impl TimerSnapshot {
    /// Capture a snapshot from the current state fields
    pub(crate) fn new(
        status: TimerStatus,
        max_duration: Duration,
        remaining: Duration,
    ) -> Self {
        Self {
            status,
            max_duration,
            remaining,
            paused: status.is_paused(),
            finished: status.is_finished(),
            captured_at: Utc::now(),
        }
    }
}
