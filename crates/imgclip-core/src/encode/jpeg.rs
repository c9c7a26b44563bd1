//! JPEG encoding for export.
//!
//! JPEG has no alpha channel. Pixels are composited onto black first, which
//! is what a canvas does when exporting a transparent region as JPEG.

use super::{validate, EncodeError};
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

/// Convert canvas quality (0.0 to 1.0) to an encoder percentage (1 to 100).
///
/// Out-of-range or non-finite values use the canvas default of 0.92.
pub fn quality_to_percent(quality: f64) -> u8 {
    let quality = if quality.is_finite() && (0.0..=1.0).contains(&quality) {
        quality
    } else {
        0.92
    };
    ((quality * 100.0).round() as u8).clamp(1, 100)
}

/// Encode RGBA pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Returns
///
/// JPEG-encoded bytes on success, or an error if encoding fails.
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate(pixels, width, height)?;

    let rgb = flatten_on_black(pixels);
    let quality = quality.clamp(1, 100);

    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed {
            format: "JPEG",
            message: e.to_string(),
        })?;

    Ok(buffer.into_inner())
}

/// Premultiply each pixel by its alpha and drop the alpha channel.
fn flatten_on_black(pixels: &[u8]) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(pixels.len() / 4 * 3);
    for px in pixels.chunks_exact(4) {
        let alpha = px[3] as u32;
        // Fast path: opaque
        if alpha == 255 {
            rgb.extend_from_slice(&px[..3]);
        } else {
            for &c in &px[..3] {
                rgb.push(((c as u32 * alpha + 127) / 255) as u8);
            }
        }
    }
    rgb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_jpeg_basic() {
        let pixels = vec![128u8; 100 * 100 * 4];

        let jpeg_bytes = encode_jpeg(&pixels, 100, 100, 90).unwrap();

        // SOI marker
        assert_eq!(&jpeg_bytes[0..2], &[0xFF, 0xD8]);
        // EOI marker
        let len = jpeg_bytes.len();
        assert_eq!(&jpeg_bytes[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let pixels = vec![128u8; 10 * 10 * 4];
        assert!(encode_jpeg(&pixels, 10, 10, 0).is_ok());
        assert!(encode_jpeg(&pixels, 10, 10, 255).is_ok());
    }

    #[test]
    fn test_encode_jpeg_invalid_pixel_data() {
        // RGB-sized buffer is rejected
        let pixels = vec![128u8; 10 * 10 * 3];
        let result = encode_jpeg(&pixels, 10, 10, 90);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_encode_jpeg_zero_width() {
        let result = encode_jpeg(&[], 0, 100, 90);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_encode_jpeg_non_square() {
        assert!(encode_jpeg(&vec![128u8; 200 * 50 * 4], 200, 50, 90).is_ok());
        assert!(encode_jpeg(&vec![128u8; 50 * 200 * 4], 50, 200, 90).is_ok());
    }

    #[test]
    fn test_quality_to_percent() {
        assert_eq!(quality_to_percent(0.92), 92);
        assert_eq!(quality_to_percent(1.0), 100);
        assert_eq!(quality_to_percent(0.0), 1);
        assert_eq!(quality_to_percent(0.9), 90);
        assert_eq!(quality_to_percent(1.5), 92);
        assert_eq!(quality_to_percent(f64::NAN), 92);
    }

    #[test]
    fn test_flatten_on_black() {
        let rgb = flatten_on_black(&[255, 100, 0, 255, 255, 255, 255, 0, 200, 200, 200, 128]);
        assert_eq!(rgb, vec![255, 100, 0, 0, 0, 0, 100, 100, 100]);
    }
}
