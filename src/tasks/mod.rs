//! Background tasks module
//!
//! The single countdown task spawned per started timer.

pub(crate) mod countdown;

// Re-export main items
pub(crate) use countdown::{countdown_task, Deadline};
