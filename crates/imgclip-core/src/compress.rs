//! Whole-image compression for upload.
//!
//! Unlike [`crate::scale::scale_image`], the output size is not given by the
//! caller but derived from the display: roughly one image pixel per device
//! pixel of viewport width, bounded by the configured limits.

use crate::encode::{encode_data_url, EncodeError, OutputMime};
use crate::raster::RasterBuffer;
use crate::size::{compute_size_policy, HostEnvironment, OutputSize, SizeLimits};
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while compressing.
#[derive(Debug, Error)]
pub enum CompressError {
    /// Source image has no pixels
    #[error("Image is empty: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// The size policy produced less than one pixel on a side
    #[error("Computed output size {width}x{height} is not a valid image size")]
    InvalidOutputSize { width: f64, height: f64 },

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Options for [`compress_image`]. Missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompressConfig {
    /// Encoder quality, 0.0 to 1.0
    pub quality: f64,
    pub mime: OutputMime,
    /// Multiplier on the pixel ratio; larger exports more pixels
    pub compress_scale_ratio: f64,
    /// Extra multiplier on iPhone, where small exports look blurry
    pub iphone_fixed_ratio: f64,
    #[serde(flatten)]
    pub limits: SizeLimits,
    /// Smooth (triangle) filtering instead of nearest neighbor
    #[serde(alias = "isSmooth")]
    pub smooth: bool,
}

impl Default for CompressConfig {
    fn default() -> Self {
        Self {
            quality: 0.92,
            mime: OutputMime::Jpeg,
            compress_scale_ratio: 1.0,
            iphone_fixed_ratio: 1.5,
            limits: SizeLimits::default(),
            smooth: true,
        }
    }
}

/// Output dimensions `compress_image` would use.
pub fn compressed_size(image: &RasterBuffer, config: &CompressConfig, host: &HostEnvironment) -> OutputSize {
    let ratio = host.pixel_ratio(config.compress_scale_ratio, config.iphone_fixed_ratio);
    compute_size_policy(image.width(), image.height(), &config.limits, ratio, host)
}

/// Resize an image for the current display and encode it as a data URL.
///
/// # Errors
///
/// * `CompressError::EmptyImage` - the image has zero width or height
/// * `CompressError::InvalidOutputSize` - limits shrink the output below a pixel
/// * `CompressError::Encode` - the encoder failed
pub fn compress_image(
    image: &RasterBuffer,
    config: &CompressConfig,
    host: &HostEnvironment,
) -> Result<String, CompressError> {
    if image.is_empty() {
        return Err(CompressError::EmptyImage {
            width: image.width(),
            height: image.height(),
        });
    }

    let size = compressed_size(image, config, host);
    let (width, height) = size.to_pixels().ok_or(CompressError::InvalidOutputSize {
        width: size.width,
        height: size.height,
    })?;

    log::debug!(
        "Compressing {}x{} -> {}x{}",
        image.width(),
        image.height(),
        width,
        height
    );

    // Fast path: if dimensions match, skip the resize
    if width == image.width() && height == image.height() {
        return Ok(encode_data_url(image, config.mime, config.quality)?);
    }

    let filter = if config.smooth {
        FilterType::Triangle
    } else {
        FilterType::Nearest
    };

    let source = image.to_rgba_image().ok_or(CompressError::EmptyImage {
        width: image.width(),
        height: image.height(),
    })?;
    let resized = RasterBuffer::from_rgba_image(image::imageops::resize(&source, width, height, filter));

    Ok(encode_data_url(&resized, config.mime, config.quality)?)
}
