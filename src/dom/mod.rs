//! Page elements the controller drives, injected as trait objects.
//!
//! Every element is optional. A page that lacks one simply loses the
//! behavior wired to it; nothing here treats absence as an error.

pub mod disk;
pub mod memory;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::notify::{AlertId, AlertNotification};

/// Element id of the file input.
pub const FILE_INPUT_ID: &str = "file";
/// Element id of the preview container.
pub const PREVIEW_CONTAINER_ID: &str = "preview-container";
/// Element id of the analysis form.
pub const ANALYSIS_FORM_ID: &str = "analysis-form";
/// Selector of the form's submit control.
pub const SUBMIT_BUTTON_SELECTOR: &str = "button[type=\"submit\"]";
/// Element id of the notifications container.
pub const ALERTS_CONTAINER_ID: &str = "alerts-container";
/// Attribute selector flagging tooltip triggers.
pub const TOOLTIP_SELECTOR: &str = "[data-bs-toggle=\"tooltip\"]";

/// Raw bytes behind a selected file, read asynchronously.
#[async_trait]
pub trait FileContents: Send + Sync {
    async fn read_all(&self) -> std::io::Result<Vec<u8>>;
}

#[async_trait]
impl FileContents for Vec<u8> {
    async fn read_all(&self) -> std::io::Result<Vec<u8>> {
        Ok(self.clone())
    }
}

/// The user's current pick from the file input.
///
/// `size_bytes` is the size the file reports, independent of how many
/// bytes a read eventually returns.
#[derive(Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub size_bytes: u64,
    contents: Arc<dyn FileContents>,
}

impl SelectedFile {
    pub fn new(
        name: impl Into<String>,
        mime_type: impl Into<String>,
        size_bytes: u64,
        contents: impl FileContents + 'static,
    ) -> Self {
        SelectedFile {
            name: name.into(),
            mime_type: mime_type.into(),
            size_bytes,
            contents: Arc::new(contents),
        }
    }

    /// A file whose reported size is the length of `bytes`.
    pub fn in_memory(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size = bytes.len() as u64;
        SelectedFile::new(name, mime_type, size, bytes)
    }

    pub async fn read(&self) -> std::io::Result<Vec<u8>> {
        self.contents.read_all().await
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.size_bytes)
            .finish_non_exhaustive()
    }
}

/// `#file`
pub trait FileInput: Send + Sync {
    /// First entry of the input's file list.
    fn first_file(&self) -> Option<SelectedFile>;
    /// Resets the input to empty.
    fn clear(&self);
}

/// `#preview-container`
pub trait PreviewContainer: Send + Sync {
    fn replace_content(&self, html: &str);
}

/// `#analysis-form`
pub trait AnalysisForm: Send + Sync {
    fn submit_button(&self) -> Option<Arc<dyn SubmitButton>>;
}

/// The form's `button[type="submit"]`.
pub trait SubmitButton: Send + Sync {
    /// Current inner markup of the button.
    fn label(&self) -> String;
    fn set_label(&self, html: &str);
    fn set_disabled(&self, disabled: bool);
}

/// `#alerts-container`
pub trait AlertsContainer: Send + Sync {
    fn append(&self, alert: &AlertNotification);
}

/// An element carrying `data-bs-toggle="tooltip"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipTrigger {
    pub element_id: String,
    #[serde(default)]
    pub title: String,
}

/// The external UI toolkit (tooltips, dismissible alerts).
pub trait Toolkit: Send + Sync {
    fn activate_tooltip(&self, trigger: &TooltipTrigger);
    /// Closes an alert with the toolkit's fade-out and removes its node.
    /// Closing an alert that is already gone must be a no-op.
    fn close_alert(&self, id: AlertId);
}

/// Element references located once when the page is ready.
#[derive(Clone, Default)]
pub struct PageElements {
    pub file_input: Option<Arc<dyn FileInput>>,
    pub preview_container: Option<Arc<dyn PreviewContainer>>,
    pub analysis_form: Option<Arc<dyn AnalysisForm>>,
    pub alerts_container: Option<Arc<dyn AlertsContainer>>,
    pub tooltip_triggers: Vec<TooltipTrigger>,
}
