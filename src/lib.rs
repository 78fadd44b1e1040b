//! Interactivity for the threadcounty upload page.
//!
//! Validates the chosen fabric image, previews it, shows a loading state on
//! submit, and raises self-dismissing alerts. Page elements and the UI
//! toolkit are injected behind traits (`dom`), so the same controller runs
//! against a real page binding or the in-memory page in `dom::memory`.

pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod format;
pub mod notify;
pub mod preview;
pub mod state;
pub mod submit;
pub mod telemetry;
pub mod validate;

// Convenience re-exports
pub use config::{load_settings, PageLayout, Settings};
pub use controller::{PageEvent, PreviewResult, SelectionOutcome, UploadInteractionController};
pub use dom::{PageElements, SelectedFile, Toolkit, TooltipTrigger};
pub use error::{UploadError, UploadResult, ValidationError};
pub use format::format_file_size;
pub use notify::{AlertId, AlertNotification, Severity};
pub use preview::PreviewState;
pub use submit::SubmissionUiState;
pub use validate::UploadLimits;
