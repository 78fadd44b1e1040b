pub mod extension;
pub mod limits;

pub use extension::{allowed_extension, extension_of, mime_for_extension, ALLOWED_EXTENSIONS};
pub use limits::{UploadLimits, DEFAULT_ALLOWED_TYPES, DEFAULT_MAX_FILE_SIZE};
