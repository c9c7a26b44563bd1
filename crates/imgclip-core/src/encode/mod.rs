//! Image encoding for export.
//!
//! This module turns an RGBA raster into the `data:` URL a canvas
//! `toDataURL(mime, quality)` call would produce:
//! - PNG (lossless, alpha preserved)
//! - JPEG with configurable quality (alpha composited onto black)
//!
//! Quality follows canvas semantics: a float in `0.0..=1.0`.
//!
//! # Examples
//!
//! ```ignore
//! use imgclip_core::encode::{encode_data_url, OutputMime};
//! use imgclip_core::RasterBuffer;
//!
//! let image = RasterBuffer::filled(10, 10, [255, 0, 0, 255]);
//! let url = encode_data_url(&image, OutputMime::Jpeg, 0.92).unwrap();
//! assert!(url.starts_with("data:image/jpeg;base64,"));
//! ```

mod jpeg;
mod png;

pub use jpeg::{encode_jpeg, quality_to_percent};
pub use png::encode_png;

use crate::raster::RasterBuffer;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("{format} encoding failed: {message}")]
    EncodingFailed {
        format: &'static str,
        message: String,
    },
}

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputMime {
    #[default]
    Png,
    Jpeg,
}

impl OutputMime {
    /// Parse a MIME type string.
    ///
    /// Unsupported types fall back to PNG, as a canvas does.
    pub fn parse(mime: &str) -> Self {
        match mime.trim().to_ascii_lowercase().as_str() {
            "image/png" | "png" => OutputMime::Png,
            "image/jpeg" | "image/jpg" | "jpeg" | "jpg" => OutputMime::Jpeg,
            other => {
                log::warn!("Unsupported mime type {:?}, falling back to image/png", other);
                OutputMime::Png
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OutputMime::Png => "image/png",
            OutputMime::Jpeg => "image/jpeg",
        }
    }
}

impl From<String> for OutputMime {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<OutputMime> for String {
    fn from(value: OutputMime) -> Self {
        value.as_str().to_string()
    }
}

/// Encode a raster into image bytes.
///
/// # Arguments
///
/// * `image` - RGBA raster to encode
/// * `mime` - Output format
/// * `quality` - 0.0 to 1.0, used by JPEG only
pub fn encode_image(image: &RasterBuffer, mime: OutputMime, quality: f64) -> Result<Vec<u8>, EncodeError> {
    let bytes = match mime {
        OutputMime::Png => encode_png(image.pixels(), image.width(), image.height())?,
        OutputMime::Jpeg => encode_jpeg(
            image.pixels(),
            image.width(),
            image.height(),
            quality_to_percent(quality),
        )?,
    };

    log::debug!(
        "Encoded {}x{} {} ({} bytes)",
        image.width(),
        image.height(),
        mime.as_str(),
        bytes.len()
    );

    Ok(bytes)
}

/// Encode a raster as a base64 `data:` URL.
pub fn encode_data_url(image: &RasterBuffer, mime: OutputMime, quality: f64) -> Result<String, EncodeError> {
    let bytes = encode_image(image, mime, quality)?;
    Ok(format!("data:{};base64,{}", mime.as_str(), STANDARD.encode(bytes)))
}

/// Check dimensions and RGBA buffer length before handing data to an encoder.
fn validate(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}
