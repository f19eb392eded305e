/// Store step: persist the decoded image as a single PNG file
///
/// Every save goes to the same path, so the most recent download replaces
/// whatever was there before. There is no locking; concurrent saves race
/// and the last writer wins.

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ColorType, DynamicImage};
use log::debug;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::StoreError;

use super::DownloadedImage;

/// Application folder inside the pictures directory
const APP_DIR_NAME: &str = "image-fetch";

/// Sub-folder holding downloads
const DOWNLOAD_DIR_NAME: &str = "downloadedImages";

/// Fixed file name, overwritten on each save
pub const FILE_NAME: &str = "downloaded_image.png";

/// Writes downloaded images to a fixed location
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    /// Store into an explicit directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store into the per-user pictures directory:
    /// - Linux: ~/Pictures/image-fetch/downloadedImages
    /// - macOS: ~/Pictures/image-fetch/downloadedImages
    /// - Windows: %USERPROFILE%\Pictures\image-fetch\downloadedImages
    pub fn default_location() -> Self {
        Self::new(default_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Full path of the stored file
    pub fn file_path(&self) -> PathBuf {
        self.dir.join(FILE_NAME)
    }

    /// Encode the image as PNG (best compression) and write it out,
    /// replacing any earlier file. The file is flushed, synced and closed
    /// before this returns.
    pub fn save(&self, image: &DownloadedImage) -> Result<PathBuf, StoreError> {
        fs::create_dir_all(&self.dir).map_err(|source| StoreError::CreateDir {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.file_path();
        let file = File::create(&path)?;
        let mut writer = BufWriter::new(file);

        let encoder =
            PngEncoder::new_with_quality(&mut writer, CompressionType::Best, FilterType::Adaptive);
        png_compatible(image.as_dynamic()).write_with_encoder(encoder)?;

        writer.flush()?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;

        debug!("Saved {}x{} image to {}", image.width(), image.height(), path.display());
        Ok(path)
    }
}

/// PNG has no floating point pixel formats, so HDR sources are narrowed to RGBA8
fn png_compatible(image: &DynamicImage) -> std::borrow::Cow<'_, DynamicImage> {
    match image.color() {
        ColorType::Rgb32F | ColorType::Rgba32F => {
            std::borrow::Cow::Owned(DynamicImage::ImageRgba8(image.to_rgba8()))
        }
        _ => std::borrow::Cow::Borrowed(image),
    }
}

/// Resolve `<pictures>/image-fetch/downloadedImages`
fn default_dir() -> PathBuf {
    let mut path = dirs::picture_dir()
        .or_else(dirs::data_dir)
        .or_else(dirs::home_dir)
        .unwrap_or_else(std::env::temp_dir);

    path.push(APP_DIR_NAME);
    path.push(DOWNLOAD_DIR_NAME);
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use tempfile::TempDir;

    fn solid(width: u32, height: u32, pixel: [u8; 4]) -> DownloadedImage {
        DownloadedImage::new(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            width,
            height,
            Rgba(pixel),
        )))
    }

    #[test]
    fn test_save_creates_nested_directory() {
        let tmp = TempDir::new().unwrap();
        let store = ImageStore::new(tmp.path().join("a").join("b"));

        let path = store.save(&solid(4, 3, [1, 2, 3, 255])).unwrap();

        assert_eq!(path, store.file_path());
        assert!(path.ends_with(FILE_NAME));
        let reopened = image::open(&path).unwrap();
        assert_eq!((reopened.width(), reopened.height()), (4, 3));
    }

    #[test]
    fn test_save_is_lossless() {
        let tmp = TempDir::new().unwrap();
        let store = ImageStore::new(tmp.path());
        let original = solid(5, 5, [17, 99, 201, 128]);

        store.save(&original).unwrap();

        let reopened = image::open(store.file_path()).unwrap();
        assert_eq!(reopened.to_rgba8().into_raw(), original.to_rgba8());
    }

    #[test]
    fn test_second_save_replaces_first() {
        let tmp = TempDir::new().unwrap();
        let store = ImageStore::new(tmp.path());

        store.save(&solid(64, 64, [255, 0, 0, 255])).unwrap();
        store.save(&solid(2, 2, [0, 255, 0, 255])).unwrap();

        let reopened = image::open(store.file_path()).unwrap();
        assert_eq!((reopened.width(), reopened.height()), (2, 2));
        assert_eq!(reopened.to_rgba8().get_pixel(1, 1), &Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_save_fails_when_directory_is_a_file() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, b"in the way").unwrap();
        let store = ImageStore::new(blocker.join("downloadedImages"));

        let result = store.save(&solid(1, 1, [0, 0, 0, 255]));

        assert!(matches!(result, Err(StoreError::CreateDir { .. })));
    }

    #[test]
    fn test_save_narrows_float_images() {
        let tmp = TempDir::new().unwrap();
        let store = ImageStore::new(tmp.path());
        let hdr = DownloadedImage::new(DynamicImage::ImageRgb32F(image::Rgb32FImage::new(3, 2)));

        store.save(&hdr).unwrap();

        let reopened = image::open(store.file_path()).unwrap();
        assert_eq!((reopened.width(), reopened.height()), (3, 2));
    }

    #[test]
    fn test_default_location_layout() {
        let store = ImageStore::default_location();
        assert!(store.dir().ends_with(Path::new(APP_DIR_NAME).join(DOWNLOAD_DIR_NAME)));
    }
}
