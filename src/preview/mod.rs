pub mod data_url;
pub mod render;

pub use data_url::to_data_url;
pub use render::render_preview;

use crate::dom::SelectedFile;
use crate::format::format_file_size;

/// The preview currently shown for a selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewState {
    /// Selection sequence number the read was started for.
    pub sequence: u64,
    pub data_url: String,
    /// `name (formatted size)`
    pub caption: String,
}

impl PreviewState {
    pub fn new(sequence: u64, file: &SelectedFile, bytes: &[u8]) -> Self {
        PreviewState {
            sequence,
            data_url: to_data_url(&file.mime_type, bytes),
            caption: caption_for(file),
        }
    }

    pub fn render(&self) -> String {
        render_preview(&self.data_url, &self.caption)
    }
}

/// `"<name> (<formatted size>)"`, using the size the file reports.
pub fn caption_for(file: &SelectedFile) -> String {
    format!("{} ({})", file.name, format_file_size(file.size_bytes))
}
