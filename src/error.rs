//! Error types for timer lifecycle operations

use thiserror::Error;

use crate::state::TimerStatus;

/// Errors surfaced by countdown timer operations
///
/// Only the operations that can genuinely be misused return errors:
/// construction with a zero duration, starting a timer that already ran,
/// and stopping a timer that has nothing to stop. Pausing and resuming
/// are idempotent no-ops in states that do not permit them.
#[derive(Debug, Error)]
pub enum TimerError {
    /// The configured countdown duration must be greater than zero
    #[error("countdown duration must be greater than zero")]
    ZeroDuration,

    /// An operation was attempted in a lifecycle state that does not permit it
    #[error("cannot {op} while the timer is {status}")]
    InvalidState {
        op: &'static str,
        status: TimerStatus,
    },
}
