//! Timer lifecycle states

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a countdown timer
///
/// A timer moves Inert → Running → {Paused ⇄ Running} → Finished.
/// Finished is terminal; a fresh timer is required for a new countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    /// Constructed but not yet started
    Inert,
    /// Actively counting down
    Running,
    /// Countdown suspended, remaining budget frozen
    Paused,
    /// Countdown completed, by natural expiry or an explicit stop
    Finished,
}

impl TimerStatus {
    /// Check if the countdown is suspended
    pub fn is_paused(&self) -> bool {
        matches!(self, TimerStatus::Paused)
    }

    /// Check if the countdown has reached its terminal state
    pub fn is_finished(&self) -> bool {
        matches!(self, TimerStatus::Finished)
    }
}

impl fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimerStatus::Inert => "inert",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Finished => "finished",
        };
        write!(f, "{}", name)
    }
}
