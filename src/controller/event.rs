use tokio::task::JoinHandle;

use crate::error::ValidationError;
use crate::notify::AlertId;

/// Events the host page delivers to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    /// `change` on `#file`.
    FileChanged,
    /// `submit` on `#analysis-form`.
    FormSubmitted,
    /// `beforeunload` on the window.
    BeforeUnload,
    /// The user pressed an alert's close button.
    AlertDismissed(AlertId),
}

/// What a file selection led to.
#[derive(Debug)]
pub enum SelectionOutcome {
    /// No file input, or the input holds no file.
    NoFile,
    /// Validation failed; an alert was shown and the input cleared.
    Rejected(ValidationError),
    /// Validation passed and the preview read is underway.
    Reading(PendingPreview),
}

/// How a preview read ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewResult {
    /// The preview container now shows this selection.
    Rendered,
    /// The read completed but the page has no preview container.
    NoContainer,
    /// A newer selection started while this one was reading.
    Stale,
    /// The file could not be read; nothing was rendered.
    ReadFailed,
    /// The read task was cancelled or panicked.
    Cancelled,
}

/// A preview read in flight.
#[derive(Debug)]
pub struct PendingPreview {
    pub sequence: u64,
    pub(crate) handle: JoinHandle<PreviewResult>,
}

impl PendingPreview {
    /// Waits for the read and returns how it ended.
    pub async fn finished(self) -> PreviewResult {
        self.handle.await.unwrap_or(PreviewResult::Cancelled)
    }
}
