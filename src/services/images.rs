//! Upload pipeline: validates, resizes and persists product images.
//!
//! Accepted images are decoded, scaled to fit within 800x600 without
//! enlarging smaller files, re-encoded as JPEG at quality 80 and written to
//! the uploads directory under a collision-resistant name.

use std::fs;
use std::path::{Path, PathBuf};

use actix_multipart::form::tempfile::TempFile;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use thiserror::Error;

use crate::domain::types::ImageRef;

/// Hard cap on accepted upload size.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;
/// Bounding box uploaded images are scaled into.
pub const MAX_WIDTH: u32 = 800;
pub const MAX_HEIGHT: u32 = 600;
const JPEG_QUALITY: u8 = 80;
/// File name of the shared placeholder image.
pub const PLACEHOLDER_FILE: &str = "default-product.png";

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Only image files are allowed")]
    NotAnImage,
    #[error("Image size must be less than 5MB")]
    TooLarge,
    #[error("Please upload only one image")]
    TooManyFiles,
    #[error("Error processing image: {0}")]
    Image(#[from] image::ImageError),
    #[error("Error storing image: {0}")]
    Io(#[from] std::io::Error),
}

/// Handle to the uploads directory.
///
/// Cheap to clone; file naming (timestamp + random suffix) avoids collisions
/// between concurrent requests instead of locking.
#[derive(Clone)]
pub struct ImageStore {
    root: PathBuf,
}

impl ImageStore {
    /// Open (and create if needed) the uploads directory.
    pub fn new(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate and persist one uploaded file, returning its public path.
    pub fn process_upload(&self, file: &TempFile) -> Result<ImageRef, UploadError> {
        let declared_image = file
            .content_type
            .as_ref()
            .is_some_and(|mime| mime.essence_str().starts_with("image/"));
        if !declared_image {
            return Err(UploadError::NotAnImage);
        }
        if file.size > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge);
        }
        let bytes = fs::read(file.file.path())?;
        self.store_bytes(&bytes)
    }

    pub(crate) fn store_bytes(&self, bytes: &[u8]) -> Result<ImageRef, UploadError> {
        let decoded = image::load_from_memory(bytes)?;
        let resized = if decoded.width() > MAX_WIDTH || decoded.height() > MAX_HEIGHT {
            decoded.resize(MAX_WIDTH, MAX_HEIGHT, FilterType::Lanczos3)
        } else {
            decoded
        };
        // JPEG carries no alpha channel.
        let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());

        let mut encoded = Vec::new();
        rgb.write_with_encoder(JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY))?;

        let file_name = format!(
            "product-{}-{}.jpg",
            chrono::Utc::now().timestamp_millis(),
            fastrand::u32(..1_000_000_000)
        );
        fs::write(self.root.join(&file_name), &encoded)?;

        Ok(ImageRef::local(&file_name))
    }

    /// Best-effort removal of a replaced image. External URLs and the shared
    /// placeholder are never touched; failures are logged and swallowed.
    pub fn remove_stale(&self, image: &ImageRef) {
        let Some(file_name) = image.local_file_name() else {
            return;
        };
        if file_name == PLACEHOLDER_FILE {
            return;
        }
        if let Err(e) = fs::remove_file(self.root.join(file_name)) {
            log::warn!("Failed to delete old image '{image}': {e}");
        }
    }

    /// Materialize the placeholder image if it is missing.
    pub fn ensure_placeholder(&self) -> Result<(), UploadError> {
        let path = self.root.join(PLACEHOLDER_FILE);
        if path.exists() {
            return Ok(());
        }
        let placeholder = RgbImage::from_pixel(MAX_WIDTH, MAX_HEIGHT, Rgb([0xf3, 0xf4, 0xf6]));
        DynamicImage::ImageRgb8(placeholder).save_with_format(&path, ImageFormat::Png)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn store() -> (tempfile::TempDir, ImageStore) {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = ImageStore::new(dir.path()).expect("image store");
        (dir, store)
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            Rgb([10, 20, 30]),
        ));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .expect("encode png");
        bytes
    }

    fn temp_file(bytes: &[u8], content_type: Option<&str>) -> TempFile {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(bytes).expect("write upload");
        TempFile {
            size: bytes.len(),
            file,
            content_type: content_type.map(|ct| ct.parse().expect("mime")),
            file_name: Some("upload.png".to_string()),
        }
    }

    #[test]
    fn stores_upload_as_local_jpeg() {
        let (_dir, store) = store();
        let image = store.store_bytes(&png_bytes(100, 80)).expect("stored");
        assert!(image.is_local());
        let file_name = image.local_file_name().expect("local file");
        assert!(file_name.starts_with("product-"));
        assert!(file_name.ends_with(".jpg"));
        let written = image::open(store.root().join(file_name)).expect("readable");
        // Small images are never enlarged.
        assert_eq!((written.width(), written.height()), (100, 80));
    }

    #[test]
    fn resizes_large_images_into_bounding_box() {
        let (_dir, store) = store();
        let image = store.store_bytes(&png_bytes(1600, 900)).expect("stored");
        let written =
            image::open(store.root().join(image.local_file_name().expect("local file")))
                .expect("readable");
        assert!(written.width() <= MAX_WIDTH);
        assert!(written.height() <= MAX_HEIGHT);
        // Aspect ratio preserved: 16:9 input fits width-bound at 800x450.
        assert_eq!((written.width(), written.height()), (800, 450));
    }

    #[test]
    fn rejects_undeclared_and_non_image_content_types() {
        let (_dir, store) = store();
        let file = temp_file(&png_bytes(10, 10), Some("application/pdf"));
        assert!(matches!(
            store.process_upload(&file),
            Err(UploadError::NotAnImage)
        ));
        let file = temp_file(&png_bytes(10, 10), None);
        assert!(matches!(
            store.process_upload(&file),
            Err(UploadError::NotAnImage)
        ));
    }

    #[test]
    fn rejects_oversized_uploads() {
        let (_dir, store) = store();
        let mut file = temp_file(&png_bytes(10, 10), Some("image/png"));
        file.size = MAX_UPLOAD_BYTES + 1;
        assert!(matches!(
            store.process_upload(&file),
            Err(UploadError::TooLarge)
        ));
    }

    #[test]
    fn rejects_undecodable_payloads() {
        let (_dir, store) = store();
        assert!(matches!(
            store.store_bytes(b"definitely not an image"),
            Err(UploadError::Image(_))
        ));
    }

    #[test]
    fn remove_stale_only_touches_local_non_placeholder_files() {
        let (_dir, store) = store();
        let image = store.store_bytes(&png_bytes(10, 10)).expect("stored");
        let path = store
            .root()
            .join(image.local_file_name().expect("local file"));
        assert!(path.exists());
        store.remove_stale(&image);
        assert!(!path.exists());

        // External URLs and the placeholder are left alone.
        store.remove_stale(&ImageRef::new("https://example.com/pic.png").expect("url"));
        store.ensure_placeholder().expect("placeholder");
        store.remove_stale(&ImageRef::placeholder());
        assert!(store.root().join(PLACEHOLDER_FILE).exists());

        // Removing a missing file is logged, not an error.
        store.remove_stale(&ImageRef::local("gone.jpg"));
    }

    #[test]
    fn placeholder_is_created_once() {
        let (_dir, store) = store();
        store.ensure_placeholder().expect("create");
        let path = store.root().join(PLACEHOLDER_FILE);
        let created = path.metadata().expect("metadata").modified().expect("mtime");
        store.ensure_placeholder().expect("noop");
        assert_eq!(
            path.metadata().expect("metadata").modified().expect("mtime"),
            created
        );
        let placeholder = image::open(&path).expect("decodable");
        assert_eq!(
            (placeholder.width(), placeholder.height()),
            (MAX_WIDTH, MAX_HEIGHT)
        );
    }
}
