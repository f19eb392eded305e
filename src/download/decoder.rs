/// Decode step: response bytes to an in-memory bitmap

use crate::error::DecodeError;

use super::DownloadedImage;

/// Decode raw bytes as PNG, JPEG or any other format the `image` crate
/// recognises from its magic bytes
pub fn decode(bytes: &[u8]) -> Result<DownloadedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let image = image::load_from_memory(bytes)?;
    Ok(DownloadedImage::new(image))
}
