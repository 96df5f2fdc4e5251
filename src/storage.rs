//! Media storage for uploaded waste images.
//!
//! Images are stored content-addressed under the media directory using a
//! two-level hash prefix layout: `{media_dir}/{hash[0..2]}/{hash[0..16]}.{ext}`.
//! Re-uploading identical bytes lands on the same path.

use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Maximum accepted upload size.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Accepted file extensions for uploads that carry a filename.
pub const ALLOWED_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "bmp", "webp"];

/// Image MIME types the analysis pipeline accepts.
const ALLOWED_MIME_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/bmp", "image/webp"];

/// Upload validation failures. Messages are user-facing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("No image data received")]
    Empty,
    #[error("Image size should not exceed 10MB")]
    TooLarge,
    #[error("Unsupported file extension: .{0} (allowed: jpg, jpeg, png, bmp, webp)")]
    UnsupportedExtension(String),
    #[error("File content is not a supported image format")]
    UnrecognizedFormat,
}

/// An upload that passed validation, with its sniffed type.
#[derive(Debug, Clone, Copy)]
pub struct ValidatedImage<'a> {
    pub data: &'a [u8],
    pub mime_type: &'static str,
    pub extension: &'static str,
}

/// Validate an uploaded image: size cap, extension whitelist when a filename
/// is present, and content sniffing of the actual bytes.
pub fn validate_image<'a>(
    data: &'a [u8],
    filename: Option<&str>,
) -> Result<ValidatedImage<'a>, UploadError> {
    if data.is_empty() {
        return Err(UploadError::Empty);
    }
    if data.len() > MAX_IMAGE_BYTES {
        return Err(UploadError::TooLarge);
    }

    if let Some(name) = filename {
        if let Some(ext) = name.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase()) {
            if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
                return Err(UploadError::UnsupportedExtension(ext));
            }
        }
    }

    let kind = infer::get(data).ok_or(UploadError::UnrecognizedFormat)?;
    if !ALLOWED_MIME_TYPES.contains(&kind.mime_type()) {
        return Err(UploadError::UnrecognizedFormat);
    }

    Ok(ValidatedImage {
        data,
        mime_type: kind.mime_type(),
        extension: kind.extension(),
    })
}

/// Construct the storage path for image content, relative to the media dir.
pub fn image_storage_path(content_hash: &str, extension: &str) -> PathBuf {
    PathBuf::from(&content_hash[..2]).join(format!("{}.{}", &content_hash[..16], extension))
}

/// Write validated image bytes into the media directory.
///
/// Returns the path relative to `media_dir`. Idempotent for identical
/// content.
pub fn store_image(media_dir: &Path, image: &ValidatedImage) -> std::io::Result<PathBuf> {
    let hash = hex::encode(Sha256::digest(image.data));
    let relative = image_storage_path(&hash, image.extension);
    let full = media_dir.join(&relative);

    if !full.exists() {
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&full, image.data)?;
    }

    Ok(relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    // Minimal magic-byte prefixes; infer only inspects headers.
    const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0, 0, 0, 0];
    const JPEG: &[u8] = &[0xff, 0xd8, 0xff, 0xe0, 0, 0, 0, 0];

    #[test]
    fn test_validate_accepts_png_and_jpeg() {
        let png = validate_image(PNG, Some("leaf.png")).unwrap();
        assert_eq!(png.mime_type, "image/png");
        assert_eq!(png.extension, "png");

        let jpeg = validate_image(JPEG, None).unwrap();
        assert_eq!(jpeg.mime_type, "image/jpeg");
        assert_eq!(jpeg.extension, "jpg");
    }

    #[test]
    fn test_validate_rejects_empty_and_oversized() {
        assert_eq!(validate_image(&[], None).unwrap_err(), UploadError::Empty);

        let mut big = vec![0u8; MAX_IMAGE_BYTES + 1];
        big[..4].copy_from_slice(&[0xff, 0xd8, 0xff, 0xe0]);
        assert_eq!(
            validate_image(&big, None).unwrap_err(),
            UploadError::TooLarge
        );
    }

    #[test]
    fn test_validate_rejects_bad_extension() {
        assert_eq!(
            validate_image(PNG, Some("animation.gif")).unwrap_err(),
            UploadError::UnsupportedExtension("gif".to_string())
        );
        // Extension check is case-insensitive.
        assert!(validate_image(PNG, Some("LEAF.PNG")).is_ok());
    }

    #[test]
    fn test_validate_rejects_non_image_content() {
        assert_eq!(
            validate_image(b"just some text pretending", Some("note.jpg")).unwrap_err(),
            UploadError::UnrecognizedFormat
        );
        // GIF magic sniffs as image/gif, which is not in the whitelist.
        assert_eq!(
            validate_image(b"GIF89a\x00\x00\x00\x00", None).unwrap_err(),
            UploadError::UnrecognizedFormat
        );
    }

    #[test]
    fn test_store_image_layout_and_idempotence() {
        let dir = tempdir().unwrap();
        let image = validate_image(PNG, None).unwrap();

        let relative = store_image(dir.path(), &image).unwrap();
        let full = dir.path().join(&relative);
        assert!(full.exists());

        // Two-level hash prefix layout.
        let components: Vec<_> = relative.components().collect();
        assert_eq!(components.len(), 2);
        assert_eq!(relative.extension().unwrap(), "png");

        // Same content, same path.
        let again = store_image(dir.path(), &image).unwrap();
        assert_eq!(relative, again);
    }
}
