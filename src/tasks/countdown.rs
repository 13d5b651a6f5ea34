//! Background countdown task
//!
//! One task is spawned per started timer. It waits for the armed deadline
//! to fire, survives pause/resume rearms of that deadline without being
//! respawned, and performs the final bookkeeping before publishing
//! completion.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::watch;
use tokio::time::{self, Instant};
use tracing::{debug, info};

use crate::state::{TimerState, TimerStatus};

/// Command state of the one-shot deadline primitive
///
/// Halting and rearming are plain watch sends; the waiting task picks up
/// the new value without being respawned.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Deadline {
    /// Countdown suspended; nothing fires until a rearm
    Halted,
    /// Fire once the given instant is reached
    Armed(Instant),
}

/// Wait for the deadline to fire, then settle the remaining budget and
/// publish completion exactly once.
pub(crate) async fn countdown_task(
    state: Arc<Mutex<TimerState>>,
    mut deadline_rx: watch::Receiver<Deadline>,
    finished_tx: watch::Sender<bool>,
) {
    loop {
        let deadline = *deadline_rx.borrow_and_update();
        match deadline {
            Deadline::Halted => {
                debug!("countdown halted, waiting for rearm");
                if deadline_rx.changed().await.is_err() {
                    // The timer handle is gone and nothing can rearm the
                    // deadline anymore.
                    debug!("timer handle dropped while halted, countdown task exiting");
                    return;
                }
            }
            Deadline::Armed(at) => {
                tokio::select! {
                    _ = time::sleep_until(at) => {
                        if complete(&state, &deadline_rx, &finished_tx) {
                            return;
                        }
                        // A halt or rearm won the race against this firing;
                        // go back to waiting on the latest deadline.
                    }
                    changed = deadline_rx.changed() => {
                        if changed.is_err() {
                            // Handle dropped mid-countdown: the armed
                            // deadline still fires at its natural expiry.
                            time::sleep_until(at).await;
                            complete(&state, &deadline_rx, &finished_tx);
                            return;
                        }
                        debug!("deadline rearmed");
                    }
                }
            }
        }
    }
}

/// Final bookkeeping under the state lock
///
/// Returns false when the deadline this task woke up for is no longer
/// current, in which case the countdown continues.
fn complete(
    state: &Mutex<TimerState>,
    deadline_rx: &watch::Receiver<Deadline>,
    finished_tx: &watch::Sender<bool>,
) -> bool {
    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);

    // Re-validate under the lock: a pause may have halted the deadline,
    // or a resume may have pushed it into the future, after sleep_until
    // already woke up.
    match *deadline_rx.borrow() {
        Deadline::Armed(at) if at <= Instant::now() => {}
        _ => return false,
    }

    // While paused the stored remaining is already authoritative; a stop
    // issued from the paused state must not subtract the stale elapsed
    // time a second time.
    if state.status == TimerStatus::Running {
        state.settle_remaining();
    }
    state.status = TimerStatus::Finished;
    let remaining = state.remaining;
    drop(state);

    info!(?remaining, "countdown finished");
    finished_tx.send_replace(true);
    true
}
