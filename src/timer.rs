//! The countdown timer handle and its lifecycle operations

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, info};

use crate::error::TimerError;
use crate::state::{TimerSnapshot, TimerState, TimerStatus};
use crate::tasks::{countdown_task, Deadline};

/// A pausable, resumable countdown timer
///
/// The timer counts down from a fixed maximum duration. While running,
/// the countdown can be suspended with [`pause`] and continued with
/// [`resume`] without losing the remaining budget, and [`stop`] forces
/// immediate expiry. Completion is announced exactly once on a
/// multi-reader signal obtained from [`finished`].
///
/// All operations are safe to call concurrently from multiple threads;
/// every mutable field sits behind a single mutex shared with the
/// background countdown task. A completed timer is not reusable - create
/// a fresh instance for a new countdown.
///
/// [`pause`]: CountdownTimer::pause
/// [`resume`]: CountdownTimer::resume
/// [`stop`]: CountdownTimer::stop
/// [`finished`]: CountdownTimer::finished
#[derive(Debug)]
pub struct CountdownTimer {
    /// Configured total countdown duration, immutable after construction
    max_duration: Duration,
    /// Mutable bookkeeping shared with the background countdown task
    state: Arc<Mutex<TimerState>>,
    /// Deadline primitive: armed/halted commands observed by the task
    deadline_tx: watch::Sender<Deadline>,
    /// Completion signal, flipped to true exactly once
    finished_tx: watch::Sender<bool>,
    /// Keep a receiver alive to prevent channel closure
    finished_rx: watch::Receiver<bool>,
}

impl CountdownTimer {
    /// Create a new inert countdown timer for the given total duration
    ///
    /// The countdown does not begin until [`start`](CountdownTimer::start)
    /// is called. Zero durations are rejected with
    /// [`TimerError::ZeroDuration`].
    pub fn new(max_duration: Duration) -> Result<Self, TimerError> {
        if max_duration.is_zero() {
            return Err(TimerError::ZeroDuration);
        }

        let (finished_tx, finished_rx) = watch::channel(false);
        let (deadline_tx, _) = watch::channel(Deadline::Halted);

        Ok(Self {
            max_duration,
            state: Arc::new(Mutex::new(TimerState::new())),
            deadline_tx,
            finished_tx,
            finished_rx,
        })
    }

    /// Start the countdown
    ///
    /// Resets the remaining budget to the full duration, arms the deadline
    /// and spawns the single background task that waits for it to fire.
    /// Valid only on a freshly constructed timer: starting twice, or
    /// starting after completion, returns [`TimerError::InvalidState`].
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> Result<(), TimerError> {
        let mut state = self.lock_state();
        if state.status != TimerStatus::Inert {
            return Err(TimerError::InvalidState {
                op: "start",
                status: state.status,
            });
        }

        let now = Instant::now();
        state.status = TimerStatus::Running;
        state.started_at = Some(now);
        state.remaining = self.max_duration;
        self.deadline_tx
            .send_replace(Deadline::Armed(now + self.max_duration));
        drop(state);

        info!(max_duration = ?self.max_duration, "countdown started");

        let shared = Arc::clone(&self.state);
        let deadline_rx = self.deadline_tx.subscribe();
        let finished_tx = self.finished_tx.clone();
        tokio::spawn(async move {
            countdown_task(shared, deadline_rx, finished_tx).await;
        });

        Ok(())
    }

    /// Suspend the countdown, freezing the remaining budget
    ///
    /// Folds the time elapsed since the last start or resume into the
    /// remaining budget and halts the deadline so it will not fire.
    /// Pausing an already paused timer is a no-op, as is pausing before
    /// start or after completion.
    pub fn pause(&self) {
        let mut state = self.lock_state();
        if state.status != TimerStatus::Running {
            return;
        }

        state.status = TimerStatus::Paused;
        state.settle_remaining();
        self.deadline_tx.send_replace(Deadline::Halted);
        debug!(remaining = ?state.remaining, "countdown paused");
    }

    /// Continue a suspended countdown
    ///
    /// Rearms the deadline to fire after exactly the frozen remaining
    /// budget. The task spawned at start keeps waiting on the rearmed
    /// deadline; no second task is spawned. Resuming while not paused is
    /// a no-op.
    pub fn resume(&self) {
        let mut state = self.lock_state();
        if state.status != TimerStatus::Paused {
            return;
        }

        let now = Instant::now();
        state.status = TimerStatus::Running;
        state.started_at = Some(now);
        self.deadline_tx
            .send_replace(Deadline::Armed(now + state.remaining));
        debug!(remaining = ?state.remaining, "countdown resumed");
    }

    /// Force the countdown to expire immediately
    ///
    /// Works from both the running and the paused state by rearming the
    /// deadline to fire now; the background task then settles the final
    /// remaining budget and publishes completion. Stopping a timer that
    /// was never started, or one that already completed, returns
    /// [`TimerError::InvalidState`].
    pub fn stop(&self) -> Result<(), TimerError> {
        let state = self.lock_state();
        match state.status {
            TimerStatus::Running | TimerStatus::Paused => {
                self.deadline_tx.send_replace(Deadline::Armed(Instant::now()));
                debug!("countdown stop requested");
                Ok(())
            }
            status => Err(TimerError::InvalidState { op: "stop", status }),
        }
    }

    /// Subscribe to the completion signal
    ///
    /// The receiver observes `true` exactly once, when the countdown
    /// completes by natural expiry or by [`stop`](CountdownTimer::stop).
    /// Any number of receivers may wait concurrently, and publishing
    /// never blocks even with no receiver present.
    pub fn finished(&self) -> watch::Receiver<bool> {
        self.finished_rx.clone()
    }

    /// Check whether the countdown has already completed
    pub fn is_finished(&self) -> bool {
        *self.finished_rx.borrow()
    }

    /// Configured total countdown duration
    pub fn max_duration(&self) -> Duration {
        self.max_duration
    }

    /// Remaining countdown budget as of the last state transition
    ///
    /// Authoritative while paused or finished. While the countdown is
    /// running the stored value is stale: the live budget is this value
    /// minus the time since [`started_at`](CountdownTimer::started_at).
    pub fn remaining(&self) -> Duration {
        self.lock_state().remaining
    }

    /// Whether the countdown is currently suspended
    pub fn paused(&self) -> bool {
        self.lock_state().status.is_paused()
    }

    /// Instant of the most recent transition into the running state
    ///
    /// `None` until the timer is started.
    pub fn started_at(&self) -> Option<Instant> {
        self.lock_state().started_at
    }

    /// Current lifecycle state
    pub fn status(&self) -> TimerStatus {
        self.lock_state().status
    }

    /// Capture a consistent snapshot of the timer for monitoring or export
    pub fn snapshot(&self) -> TimerSnapshot {
        let state = self.lock_state();
        TimerSnapshot::new(state.status, self.max_duration, state.remaining)
    }

    /// Lock the shared state, recovering the guard if a holder panicked
    ///
    /// State reads and transitions stay meaningful after a poisoned lock;
    /// no operation panics while holding it.
    fn lock_state(&self) -> MutexGuard<'_, TimerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Display for CountdownTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock_state();
        write!(
            f,
            "max duration: {:?}, remaining: {:?}, paused: {}, finished: {}",
            self.max_duration,
            state.remaining,
            state.status.is_paused(),
            self.is_finished(),
        )
    }
}
