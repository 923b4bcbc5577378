//! Defines [SurfaceSnapshot], the pixels read straight off an emulator's
//! rendering surface, and its encoding into a frame payload.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, RgbaImage};
use thiserror::Error;

use super::{Dimensions, data_url};

/// The JPEG quality used for direct surface captures.
pub const CAPTURE_JPEG_QUALITY: u8 = 50;

/// A copy of a rendering surface's pixels, tightly packed RGBA rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSnapshot {
    dimensions: Dimensions,
    rgba: Vec<u8>,
}

impl SurfaceSnapshot {
    /// Wrap `rgba` pixels. The buffer has to hold exactly
    /// `dimensions.area() * 4` bytes.
    pub fn new(dimensions: Dimensions, rgba: Vec<u8>) -> Result<Self, SnapshotError> {
        let expected = dimensions.area() * 4;
        if rgba.len() != expected {
            return Err(SnapshotError::SizeMismatch {
                expected,
                actual: rgba.len(),
            });
        }

        Ok(Self { dimensions, rgba })
    }

    /// The snapshot's dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    /// The raw RGBA bytes.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    /// Compress the snapshot into a `data:image/jpeg;base64,...` URL.
    pub fn to_jpeg_data_url(&self, quality: u8) -> Result<String, SnapshotError> {
        let (width, height): (u32, u32) = self.dimensions.into();
        let rgba = RgbaImage::from_raw(width, height, self.rgba.clone()).ok_or(
            SnapshotError::SizeMismatch {
                expected: self.dimensions.area() * 4,
                actual: self.rgba.len(),
            },
        )?;

        // JPEG has no alpha channel.
        let rgb = DynamicImage::ImageRgba8(rgba).to_rgb8();

        let mut jpeg = Cursor::new(Vec::new());
        JpegEncoder::new_with_quality(&mut jpeg, quality.clamp(1, 100)).encode_image(&rgb)?;

        Ok(data_url::encode("image/jpeg", jpeg.get_ref()))
    }
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Surface pixel buffer size mismatch: expected {expected} bytes, got {actual} bytes")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("Failed to encode surface: {0}")]
    Encode(#[from] image::ImageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrong_buffer_size_is_rejected() {
        let d = Dimensions::new(2, 2).unwrap();
        assert!(matches!(
            SurfaceSnapshot::new(d, vec![0; 15]),
            Err(SnapshotError::SizeMismatch {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn jpeg_capture_is_an_image_payload() {
        let d = Dimensions::new(8, 6).unwrap();
        let snapshot = SurfaceSnapshot::new(d, vec![200; d.area() * 4]).unwrap();

        let url = snapshot.to_jpeg_data_url(CAPTURE_JPEG_QUALITY).unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert!(data_url::is_capture_payload(&url));

        let bytes = data_url::DataUrl::parse(&url).unwrap().decode().unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (8, 6));
    }
}
