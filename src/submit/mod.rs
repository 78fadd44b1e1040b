//! Loading feedback on the analysis form's submit control.
//!
//! The submission itself is never intercepted; only the button changes.

use std::fmt;
use std::sync::Arc;

use crate::dom::SubmitButton;

/// Button markup while a submission is in flight.
pub const PROCESSING_LABEL: &str = "<span class=\"spinner-border spinner-border-sm\" role=\"status\" aria-hidden=\"true\"></span>\nProcessing...";

/// Whether a submission is in flight, as seen on the submit control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionUiState {
    #[default]
    Idle,
    Submitting,
}

/// A submit control switched into its loading state, remembering how to
/// switch it back.
pub struct SubmitFeedback {
    button:         Arc<dyn SubmitButton>,
    original_label: String,
}

impl SubmitFeedback {
    /// Captures the current label, then shows the spinner and disables.
    pub fn engage(button: Arc<dyn SubmitButton>) -> Self {
        let original_label = button.label();
        button.set_label(PROCESSING_LABEL);
        button.set_disabled(true);
        SubmitFeedback { button, original_label }
    }

    pub fn original_label(&self) -> &str {
        &self.original_label
    }

    /// Puts the original label back and re-enables the control.
    pub fn restore(self) {
        self.button.set_label(&self.original_label);
        self.button.set_disabled(false);
    }
}

impl fmt::Debug for SubmitFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitFeedback")
            .field("original_label", &self.original_label)
            .finish_non_exhaustive()
    }
}
