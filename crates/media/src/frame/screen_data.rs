//! Turning a captured frame payload (see [super::data_url]) back into pixels
//! on the backend side.

use image::imageops::{self, FilterType};
use image::RgbImage;
use thiserror::Error;

use super::Dimensions;
use super::data_url::{DataUrl, DataUrlError};

/// The emulator renders at `1 / SURFACE_SCALE_FACTOR` of the requested size
/// (and is stretched for display), so raw pixel payloads come in that small.
pub const SURFACE_SCALE_FACTOR: u32 = 4;

/// Decode a captured frame payload into an RGB image of exactly `target`
/// dimensions.
///
/// - `data:image/*` payloads are decoded with whatever format they hold.
/// - `data:application/octet-stream` payloads are packed RGB pixels at
///   `target / raw_scale_factor`.
///
/// Anything not already `target` sized is resized with a Lanczos filter.
pub fn decode_screen_data(
    screen_data: &str,
    target: Dimensions,
    raw_scale_factor: u32,
) -> Result<RgbImage, ScreenDataError> {
    let url = DataUrl::parse(screen_data)?;

    let image = if url.is_raw_rgb() {
        let source = target
            .scaled_down(raw_scale_factor)
            .ok_or(ScreenDataError::RawTooSmall {
                target,
                factor: raw_scale_factor,
            })?;
        let bytes = url.decode()?;

        let expected = source.area() * 3;
        if bytes.len() != expected {
            return Err(ScreenDataError::RawSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let (width, height): (u32, u32) = source.into();
        RgbImage::from_raw(width, height, bytes).ok_or(ScreenDataError::RawSizeMismatch {
            expected,
            actual: 0,
        })?
    } else if url.is_image() {
        image::load_from_memory(&url.decode()?)?.to_rgb8()
    } else {
        return Err(ScreenDataError::UnsupportedHeader(url.header().to_string()));
    };

    Ok(fit_to(image, target))
}

/// A black image, used whenever there is no usable frame.
pub fn placeholder(target: Dimensions) -> RgbImage {
    let (width, height): (u32, u32) = target.into();
    RgbImage::new(width, height)
}

fn fit_to(image: RgbImage, target: Dimensions) -> RgbImage {
    let (width, height): (u32, u32) = target.into();
    if image.dimensions() == (width, height) {
        image
    } else {
        imageops::resize(&image, width, height, FilterType::Lanczos3)
    }
}

#[derive(Error, Debug)]
pub enum ScreenDataError {
    #[error(transparent)]
    DataUrl(#[from] DataUrlError),
    #[error("Unsupported header: {0}")]
    UnsupportedHeader(String),
    #[error("Raw pixel data size invalid (expected {expected} bytes, got {actual} bytes).")]
    RawSizeMismatch { expected: usize, actual: usize },
    #[error("Raw pixel data for {target} can't be {factor}x smaller.")]
    RawTooSmall { target: Dimensions, factor: u32 },
    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{ImageFormat, Rgb};

    use super::super::data_url;
    use super::*;

    fn png_url(image: &RgbImage) -> String {
        let mut png = Cursor::new(Vec::new());
        image.write_to(&mut png, ImageFormat::Png).unwrap();
        data_url::encode("image/png", png.get_ref())
    }

    #[test]
    fn png_payload_is_resized_to_target() {
        let small = RgbImage::from_pixel(4, 3, Rgb([255, 0, 0]));
        let target = Dimensions::new(16, 12).unwrap();

        let decoded = decode_screen_data(&png_url(&small), target, SURFACE_SCALE_FACTOR).unwrap();
        assert_eq!(decoded.dimensions(), (16, 12));
    }

    #[test]
    fn matching_png_is_kept_pixel_exact() {
        let exact = RgbImage::from_pixel(8, 8, Rgb([10, 20, 30]));
        let target = Dimensions::new(8, 8).unwrap();

        let decoded = decode_screen_data(&png_url(&exact), target, SURFACE_SCALE_FACTOR).unwrap();
        assert_eq!(decoded, exact);
    }

    #[test]
    fn raw_payload_is_quarter_size_rgb() {
        let target = Dimensions::new(16, 8).unwrap();
        let raw = vec![128; 4 * 2 * 3];
        let url = data_url::encode("application/octet-stream", &raw);

        let decoded = decode_screen_data(&url, target, SURFACE_SCALE_FACTOR).unwrap();
        assert_eq!(decoded.dimensions(), (16, 8));
    }

    #[test]
    fn raw_payload_with_wrong_length_is_rejected() {
        let target = Dimensions::new(16, 8).unwrap();
        let url = data_url::encode("application/octet-stream", &[0; 5]);

        assert!(matches!(
            decode_screen_data(&url, target, SURFACE_SCALE_FACTOR),
            Err(ScreenDataError::RawSizeMismatch {
                expected: 24,
                actual: 5
            })
        ));
    }

    #[test]
    fn unknown_media_type_is_rejected() {
        let target = Dimensions::new(16, 8).unwrap();
        let url = data_url::encode("text/plain", b"hello");

        assert!(matches!(
            decode_screen_data(&url, target, SURFACE_SCALE_FACTOR),
            Err(ScreenDataError::UnsupportedHeader(header)) if header == "data:text/plain;base64"
        ));
    }

    #[test]
    fn placeholder_is_black() {
        let image = placeholder(Dimensions::new(3, 2).unwrap());
        assert_eq!(image.dimensions(), (3, 2));
        assert!(image.pixels().all(|p| *p == Rgb([0, 0, 0])));
    }
}
