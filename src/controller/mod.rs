pub mod controller;
pub mod event;

pub use controller::UploadInteractionController;
pub use event::{PageEvent, PendingPreview, PreviewResult, SelectionOutcome};
