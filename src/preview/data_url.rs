use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Encodes file bytes as a `data:` URL usable as an `img` source.
///
/// An empty MIME type falls back to `application/octet-stream`, as browsers do.
pub fn to_data_url(mime_type: &str, bytes: &[u8]) -> String {
    let mime = if mime_type.is_empty() { "application/octet-stream" } else { mime_type };
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
