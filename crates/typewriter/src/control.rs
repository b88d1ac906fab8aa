//! Externally-set pause and cancel flags.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Default)]
struct Flags {
    cancelled: AtomicBool,
    paused: AtomicBool,
}

/// Shared control state for one animation run.
///
/// Clones share the same flags: hand one clone to the scheduler and keep
/// another for the pause/skip triggers. The scheduler only reads the flags,
/// at step boundaries; it never writes them.
///
/// `cancelled` is terminal. `paused` toggles freely until then.
///
/// # Examples
///
/// ```rust
/// use typewriter::ScheduleState;
///
/// let control = ScheduleState::new();
/// let trigger = control.clone();
///
/// assert!(trigger.toggle_pause());
/// assert!(control.is_paused());
///
/// trigger.cancel();
/// assert!(control.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScheduleState {
    flags: Arc<Flags>,
}

impl ScheduleState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request that the run stops at the next step boundary.
    pub fn cancel(&self) {
        if !self.flags.cancelled.swap(true, Ordering::SeqCst) {
            log::info!("schedule: cancel requested");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.flags.cancelled.load(Ordering::SeqCst)
    }

    /// Set the pause flag. Ignored once cancelled.
    pub fn set_paused(&self, paused: bool) {
        if self.is_cancelled() {
            return;
        }
        self.flags.paused.store(paused, Ordering::SeqCst);
        log::debug!("schedule: paused = {paused}");
    }

    /// Flip the pause flag and return the new value.
    pub fn toggle_pause(&self) -> bool {
        let paused = !self.is_paused();
        self.set_paused(paused);
        self.is_paused()
    }

    pub fn is_paused(&self) -> bool {
        self.flags.paused.load(Ordering::SeqCst)
    }
}
