use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::preview::PreviewState;
use crate::submit::SubmitFeedback;

// ---------------------------------------------------------------------------
// Controller state
// ---------------------------------------------------------------------------

/// Mutable state shared between the controller and its preview reads.
#[derive(Default)]
pub struct ControllerState {
    /// Bumped on every file selection; a read whose number is no longer
    /// current is discarded on completion.
    pub selection: u64,
    /// What the preview container is currently showing.
    pub preview: Option<PreviewState>,
    /// Present while a submission is in flight.
    pub submission: Option<SubmitFeedback>,
}

impl ControllerState {
    pub fn new() -> Self {
        ControllerState::default()
    }

    /// Starts a new selection and returns its sequence number.
    pub fn next_selection(&mut self) -> u64 {
        self.selection += 1;
        self.selection
    }

    pub fn is_current(&self, sequence: u64) -> bool {
        self.selection == sequence
    }
}

/// Controller state shared with each preview read task.
pub type SharedState = Arc<Mutex<ControllerState>>;

/// Locks a mutex, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
