/// Image download module
///
/// This module handles:
/// - Fetching raw bytes over HTTP (fetcher.rs)
/// - Decoding bytes into a bitmap (decoder.rs)
/// - Saving the bitmap as PNG (store.rs)
/// - Running the three steps in order (workflow.rs)

pub mod decoder;
pub mod fetcher;
pub mod store;
pub mod workflow;

use image::DynamicImage;

pub use fetcher::{HttpFetcher, ImageFetcher};
pub use store::ImageStore;
pub use workflow::{download_image, download_image_async, DownloadOutcome, DownloadWorkflow};

/// A decoded image, ready to be displayed or saved
#[derive(Debug, Clone)]
pub struct DownloadedImage {
    image: DynamicImage,
}

impl DownloadedImage {
    pub fn new(image: DynamicImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Pixel data as tightly packed RGBA8
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.image.to_rgba8().into_raw()
    }

    pub fn as_dynamic(&self) -> &DynamicImage {
        &self.image
    }
}
