//! Files picked from the local disk.
//!
//! The MIME type comes from the extension, the way a browser fills in
//! `File.type`; the content is never inspected for that. `sniff_mime` looks
//! at the header bytes separately so callers can point out a mismatch.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use image::ImageFormat;
use tokio::io::AsyncReadExt;

use crate::dom::{FileContents, SelectedFile};
use crate::error::UploadResult;

/// Header bytes needed to recognise every supported format.
const SNIFF_LEN: u64 = 64;

/// Contents read lazily from a path.
pub struct DiskContents {
    path: PathBuf,
}

#[async_trait]
impl FileContents for DiskContents {
    async fn read_all(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}

/// Builds a `SelectedFile` for `path` from its metadata. Nothing is read yet.
pub async fn open(path: &Path) -> UploadResult<SelectedFile> {
    let metadata = tokio::fs::metadata(path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(SelectedFile::new(
        name,
        mime_from_path(path),
        metadata.len(),
        DiskContents { path: path.to_owned() },
    ))
}

/// MIME type by extension; empty when the extension is unknown.
pub fn mime_from_path(path: &Path) -> &'static str {
    ImageFormat::from_path(path).map(mime_for_format).unwrap_or("")
}

/// MIME type detected from the file's leading bytes.
pub async fn sniff_mime(path: &Path) -> UploadResult<Option<&'static str>> {
    let mut header = Vec::with_capacity(SNIFF_LEN as usize);
    tokio::fs::File::open(path)
        .await?
        .take(SNIFF_LEN)
        .read_to_end(&mut header)
        .await?;
    Ok(image::guess_format(&header).ok().map(mime_for_format))
}

fn mime_for_format(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png  => "image/png",
        ImageFormat::Jpeg => "image/jpeg",
        ImageFormat::Gif  => "image/gif",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Tiff => "image/tiff",
        ImageFormat::Bmp  => "image/bmp",
        ImageFormat::Ico  => "image/x-icon",
        ImageFormat::Avif => "image/avif",
        _                 => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn extension_drives_the_mime_type() {
        assert_eq!(mime_from_path(Path::new("weave.JPG")), "image/jpeg");
        assert_eq!(mime_from_path(Path::new("weave.tif")), "image/tiff");
        assert_eq!(mime_from_path(Path::new("weave.gif")), "image/gif");
        assert_eq!(mime_from_path(Path::new("notes.txt")), "");
    }

    #[tokio::test]
    async fn sniffing_reads_the_header() {
        let mut file = tempfile::Builder::new().suffix(".jpg").tempfile().unwrap();
        file.write_all(&[0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0]).unwrap();

        assert_eq!(mime_from_path(file.path()), "image/jpeg");
        assert_eq!(sniff_mime(file.path()).await.unwrap(), Some("image/png"));
    }

    #[tokio::test]
    async fn sniffing_unknown_content_finds_nothing() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(b"plain text, not an image").unwrap();

        assert_eq!(sniff_mime(file.path()).await.unwrap(), None);
        assert!(sniff_mime(Path::new("/nonexistent/weave.png")).await.is_err());
    }

    #[tokio::test]
    async fn open_reports_size_and_reads_lazily() {
        let mut file = tempfile::Builder::new().suffix(".bmp").tempfile().unwrap();
        file.write_all(b"BM0123456789").unwrap();

        let selected = open(file.path()).await.unwrap();
        assert_eq!(selected.mime_type, "image/bmp");
        assert_eq!(selected.size_bytes, 12);
        assert_eq!(selected.read().await.unwrap(), b"BM0123456789");
    }
}
