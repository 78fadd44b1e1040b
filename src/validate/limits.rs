use serde::{Deserialize, Serialize};

use crate::dom::SelectedFile;
use crate::error::{ValidationError, MIB};

/// MIME types the page accepts by default.
pub const DEFAULT_ALLOWED_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/tiff", "image/bmp"];

/// Default upload ceiling: 16 MiB, shared with the upload endpoint.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 16 * MIB;

/// Type and size constraints applied to every file selection.
///
/// The defaults must stay in lockstep with the server's own checks; the
/// alert text is derived from these values so a changed limit never shows a
/// stale message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadLimits {
    pub allowed_types: Vec<String>,
    pub max_file_size: u64,
}

impl Default for UploadLimits {
    fn default() -> Self {
        UploadLimits {
            allowed_types: DEFAULT_ALLOWED_TYPES.iter().map(|s| s.to_string()).collect(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
        }
    }
}

impl UploadLimits {
    /// Type first, then size. The first failing check wins.
    pub fn check(&self, file: &SelectedFile) -> Result<(), ValidationError> {
        if !self.allows_type(&file.mime_type) {
            return Err(ValidationError::InvalidFileType {
                mime_type: file.mime_type.clone(),
                accepted: self.accepted_label(),
            });
        }
        if file.size_bytes > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size_bytes: file.size_bytes,
                max_bytes: self.max_file_size,
            });
        }
        Ok(())
    }

    /// Exact, case-sensitive membership, like the browser's `File.type`.
    pub fn allows_type(&self, mime_type: &str) -> bool {
        self.allowed_types.iter().any(|t| t == mime_type)
    }

    /// Human list of accepted formats, e.g. `JPG, PNG, TIFF, or BMP`.
    pub fn accepted_label(&self) -> String {
        let labels: Vec<String> = self.allowed_types.iter().map(|t| format_label(t)).collect();
        match labels.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [a, b] => format!("{} or {}", a, b),
            [rest @ .., last] => format!("{}, or {}", rest.join(", "), last),
        }
    }
}

fn format_label(mime_type: &str) -> String {
    match mime_type {
        "image/jpeg" => "JPG".to_owned(),
        other => other
            .rsplit('/')
            .next()
            .unwrap_or(other)
            .to_ascii_uppercase(),
    }
}
