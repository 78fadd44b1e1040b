//! Error types for the upload page.

use thiserror::Error;

use crate::format::format_file_size;

/// Bytes in one mebibyte.
pub const MIB: u64 = 1024 * 1024;

/// Result type for fallible crate operations (configuration, disk-backed files).
pub type UploadResult<T> = Result<T, UploadError>;

/// Why a selected file was refused before submission.
///
/// The `Display` text is exactly what the user sees in the danger alert.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// MIME type is outside the allow-set.
    #[error("Please select a valid image file{}", accepted_suffix(.accepted))]
    InvalidFileType { mime_type: String, accepted: String },

    /// File exceeds the size limit.
    #[error("File is too large. Maximum size is {}", max_size_label(.max_bytes))]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },
}

fn accepted_suffix(accepted: &str) -> String {
    if accepted.is_empty() {
        String::new()
    } else {
        format!(" ({})", accepted)
    }
}

/// Whole mebibyte limits read `16MB`; other limits use the caption format.
fn max_size_label(max_bytes: &u64) -> String {
    let max_bytes = *max_bytes;
    if max_bytes > 0 && max_bytes % MIB == 0 {
        format!("{}MB", max_bytes / MIB)
    } else {
        format_file_size(max_bytes)
    }
}

/// Errors outside of user-facing validation.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for UploadError {
    fn from(err: serde_json::Error) -> Self {
        UploadError::Config(err.to_string())
    }
}
