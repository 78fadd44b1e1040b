use std::sync::{Arc, Mutex};

use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::controller::event::{PageEvent, PendingPreview, PreviewResult, SelectionOutcome};
use crate::dom::{PageElements, PreviewContainer, SelectedFile, Toolkit};
use crate::notify::{AlertId, Notifier, Severity};
use crate::preview::PreviewState;
use crate::state::{lock, ControllerState, SharedState};
use crate::submit::{SubmissionUiState, SubmitFeedback};
use crate::validate::UploadLimits;

/// Drives the upload page once its content is ready.
///
/// Construction activates tooltips; afterwards the host forwards page events
/// through `dispatch`. Every behavior checks for its element first and does
/// nothing when the page lacks it.
///
/// File selection and alerts spawn tasks, so the controller must live inside
/// a tokio runtime.
pub struct UploadInteractionController {
    elements: PageElements,
    limits:   UploadLimits,
    notifier: Notifier,
    state:    SharedState,
}

impl UploadInteractionController {
    pub fn init(elements: PageElements, toolkit: Arc<dyn Toolkit>, settings: &Settings) -> Self {
        for trigger in &elements.tooltip_triggers {
            toolkit.activate_tooltip(trigger);
        }
        debug!(tooltips = elements.tooltip_triggers.len(), "upload page ready");

        let notifier = Notifier::new(
            elements.alerts_container.clone(),
            toolkit,
            settings.alert_dismiss_after(),
        );

        UploadInteractionController {
            elements,
            limits: settings.limits.clone(),
            notifier,
            state: Arc::new(Mutex::new(ControllerState::new())),
        }
    }

    pub fn dispatch(&self, event: PageEvent) {
        debug!(?event, "page event");
        match event {
            PageEvent::FileChanged => {
                // The preview read runs detached; its task outlives the handle.
                let outcome = self.on_file_change();
                debug!(?outcome, "file selection handled");
            }
            PageEvent::FormSubmitted => self.on_submit(),
            PageEvent::BeforeUnload => self.on_before_unload(),
            PageEvent::AlertDismissed(id) => {
                if !self.dismiss_alert(id) {
                    debug!(%id, "alert was already closed");
                }
            }
        }
    }

    // -----------------------------------------------------------------------
    // File selection
    // -----------------------------------------------------------------------

    /// Validates the chosen file and, if it passes, starts the preview read.
    pub fn on_file_change(&self) -> SelectionOutcome {
        let Some(input) = self.elements.file_input.as_ref() else {
            return SelectionOutcome::NoFile;
        };
        let Some(file) = input.first_file() else {
            return SelectionOutcome::NoFile;
        };

        let sequence = lock(&self.state).next_selection();

        if let Err(err) = self.limits.check(&file) {
            warn!(file = %file.name, mime = %file.mime_type, size = file.size_bytes, %err, "rejected file selection");
            self.notifier.show(&err.to_string(), Severity::Danger);
            input.clear();
            return SelectionOutcome::Rejected(err);
        }

        let container = self.elements.preview_container.clone();
        let state = self.state.clone();
        let handle = tokio::spawn(load_preview(file, sequence, container, state));
        SelectionOutcome::Reading(PendingPreview { sequence, handle })
    }

    /// What the preview container currently shows, if anything.
    pub fn current_preview(&self) -> Option<PreviewState> {
        lock(&self.state).preview.clone()
    }

    // -----------------------------------------------------------------------
    // Submission feedback
    // -----------------------------------------------------------------------

    /// Switches the submit control into its loading state.
    ///
    /// The original label is captured once; a repeat submit while one is
    /// already in flight leaves the saved label alone.
    pub fn on_submit(&self) {
        let Some(form) = self.elements.analysis_form.as_ref() else {
            return;
        };
        let Some(button) = form.submit_button() else {
            return;
        };

        let mut state = lock(&self.state);
        if state.submission.is_some() {
            debug!("submission already in flight");
            return;
        }
        let feedback = SubmitFeedback::engage(button);
        debug!(original = feedback.original_label(), "submit control disabled");
        state.submission = Some(feedback);
    }

    /// One-shot restoration of the submit control when the page unloads.
    pub fn on_before_unload(&self) {
        let feedback = lock(&self.state).submission.take();
        if let Some(feedback) = feedback {
            feedback.restore();
            debug!("submit control restored");
        }
    }

    pub fn submission_state(&self) -> SubmissionUiState {
        if lock(&self.state).submission.is_some() {
            SubmissionUiState::Submitting
        } else {
            SubmissionUiState::Idle
        }
    }

    // -----------------------------------------------------------------------
    // Alerts
    // -----------------------------------------------------------------------

    /// Shows an alert that closes itself after the configured delay.
    /// Returns `None` when the page has no alerts container.
    pub fn show_alert(&self, message: &str, severity: Severity) -> Option<AlertId> {
        self.notifier.show(message, severity)
    }

    /// Closes an alert early and cancels its auto-dismiss.
    pub fn dismiss_alert(&self, id: AlertId) -> bool {
        self.notifier.dismiss(id)
    }

    /// Alerts still waiting for their auto-dismiss.
    pub fn pending_alerts(&self) -> usize {
        self.notifier.pending()
    }
}

/// Reads the file, then renders it unless a newer selection took over.
async fn load_preview(
    file: SelectedFile,
    sequence: u64,
    container: Option<Arc<dyn PreviewContainer>>,
    state: SharedState,
) -> PreviewResult {
    let bytes = match file.read().await {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(file = %file.name, %err, "could not read file for preview");
            return PreviewResult::ReadFailed;
        }
    };

    let mut state = lock(&state);
    if !state.is_current(sequence) {
        debug!(file = %file.name, sequence, current = state.selection, "discarding stale preview");
        return PreviewResult::Stale;
    }
    let Some(container) = container else {
        return PreviewResult::NoContainer;
    };

    let preview = PreviewState::new(sequence, &file, &bytes);
    container.replace_content(&preview.render());
    info!(caption = %preview.caption, "preview rendered");
    state.preview = Some(preview);
    PreviewResult::Rendered
}
