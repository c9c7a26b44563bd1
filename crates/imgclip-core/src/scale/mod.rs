//! Pixel resampling engine.
//!
//! Four interchangeable algorithms map an RGBA source buffer onto a
//! destination buffer of different dimensions:
//!
//! - **Nearest neighbor**: copies the closest source pixel (1 sample)
//! - **Bilinear**: blends the 2x2 neighbourhood (4 samples)
//! - **Bicubic (matrix)**: fits a bicubic patch to the 4x4 neighbourhood (16 samples)
//! - **Bicubic (separable)**: convolves the 4x4 neighbourhood with a cubic kernel (16 samples)
//!
//! # Algorithm
//!
//! All four use inverse mapping with the same coordinate convention: for the
//! destination pixel `(col, row)` the source coordinate is
//!
//! ```text
//! src_col = min(src_w - 1, col / (dst_w / src_w))
//! src_row = min(src_h - 1, row / (dst_h / src_h))
//! ```
//!
//! split into an integer part and a fraction `(u, v)` in `[0, 1)`. Neighbour
//! lookups are clamped to the image, so samples past an edge replicate the
//! edge pixel.
//!
//! Output channels are clamped to `[0, 255]` and rounded half-to-even, the
//! same conversion a clamped byte array store performs.

mod bicubic;
mod bilinear;
mod config;
mod kernel;
mod nearest;

pub use config::{scale_image, ScaleConfig};
pub use kernel::cubic_weight;

use crate::encode::EncodeError;
use crate::raster::{byte_len, RasterBuffer, CHANNELS};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for resampling operations.
#[derive(Debug, Error)]
pub enum ScaleError {
    /// A buffer's length doesn't match its declared dimensions.
    #[error("Invalid {buffer} buffer: expected {expected} bytes (width * height * 4), got {actual}")]
    BufferSizeMismatch {
        buffer: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Source or target dimensions are zero.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Encoding the scaled image failed.
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Resampling algorithm.
///
/// Serialized as the numeric `processType` used by the JavaScript API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ScaleAlgorithm {
    /// Nearest neighbor (fastest, blocky).
    Nearest,
    /// Bilinear interpolation (fast, slightly soft).
    #[default]
    Bilinear,
    /// Bicubic interpolation from the closed-form coefficient matrix.
    BicubicMatrix,
    /// Bicubic interpolation from the separable cubic convolution kernel.
    BicubicSeparable,
}

impl ScaleAlgorithm {
    /// Convert a `processType` value.
    ///
    /// Values:
    /// - 0 = Nearest
    /// - 1 = Bilinear
    /// - 2 = BicubicMatrix
    /// - 3 = BicubicSeparable
    ///
    /// Any other value falls back to the default (Bilinear).
    pub fn from_process_type(value: i32) -> Self {
        match value {
            0 => ScaleAlgorithm::Nearest,
            1 => ScaleAlgorithm::Bilinear,
            2 => ScaleAlgorithm::BicubicMatrix,
            3 => ScaleAlgorithm::BicubicSeparable,
            other => {
                log::warn!("Unknown processType {}, using default", other);
                ScaleAlgorithm::default()
            }
        }
    }

    /// The numeric `processType` for this algorithm.
    pub fn process_type(self) -> i32 {
        match self {
            ScaleAlgorithm::Nearest => 0,
            ScaleAlgorithm::Bilinear => 1,
            ScaleAlgorithm::BicubicMatrix => 2,
            ScaleAlgorithm::BicubicSeparable => 3,
        }
    }

    /// Source samples read per destination pixel.
    pub fn samples_per_pixel(self) -> usize {
        match self {
            ScaleAlgorithm::Nearest => 1,
            ScaleAlgorithm::Bilinear => 4,
            ScaleAlgorithm::BicubicMatrix | ScaleAlgorithm::BicubicSeparable => 16,
        }
    }
}

impl From<i32> for ScaleAlgorithm {
    fn from(value: i32) -> Self {
        Self::from_process_type(value)
    }
}

impl From<ScaleAlgorithm> for i32 {
    fn from(value: ScaleAlgorithm) -> Self {
        value.process_type()
    }
}

/// Resample `src` into the caller-allocated `dst`.
///
/// # Arguments
///
/// * `src` - Source RGBA data, `src_width * src_height * 4` bytes
/// * `dst` - Destination RGBA data, `dst_width * dst_height * 4` bytes
/// * `algorithm` - Interpolation method
///
/// # Errors
///
/// Returns `ScaleError::BufferSizeMismatch` if either buffer's length doesn't
/// match its dimensions; nothing is written in that case. Zero dimensions are
/// degenerate rather than an error: the call succeeds and writes nothing.
pub fn resample(
    src: &[u8],
    src_width: u32,
    src_height: u32,
    dst: &mut [u8],
    dst_width: u32,
    dst_height: u32,
    algorithm: ScaleAlgorithm,
) -> Result<(), ScaleError> {
    check_len("source", src, src_width, src_height)?;
    check_len("destination", dst, dst_width, dst_height)?;

    if src_width == 0 || src_height == 0 || dst_width == 0 || dst_height == 0 {
        return Ok(());
    }

    let grid = SampleGrid::new(src_width, src_height, dst_width, dst_height);

    log::debug!(
        "Resampling {}x{} -> {}x{} with {:?}",
        src_width,
        src_height,
        dst_width,
        dst_height,
        algorithm
    );

    match algorithm {
        ScaleAlgorithm::Nearest => nearest::scale(src, dst, &grid),
        ScaleAlgorithm::Bilinear => bilinear::scale(src, dst, &grid),
        ScaleAlgorithm::BicubicMatrix => bicubic::scale(src, dst, &grid),
        ScaleAlgorithm::BicubicSeparable => kernel::scale(src, dst, &grid),
    }

    Ok(())
}

/// Resample one raster into another, using each buffer's own dimensions.
pub fn scale_image_data(src: &RasterBuffer, dst: &mut RasterBuffer, algorithm: ScaleAlgorithm) {
    let (dst_width, dst_height) = (dst.width(), dst.height());
    // Both buffers uphold the length invariant, so this cannot fail
    let _ = resample(
        src.pixels(),
        src.width(),
        src.height(),
        dst.pixels_mut(),
        dst_width,
        dst_height,
        algorithm,
    );
}

/// Resample into a newly allocated raster of the given size.
pub fn resize(
    src: &RasterBuffer,
    width: u32,
    height: u32,
    algorithm: ScaleAlgorithm,
) -> Result<RasterBuffer, ScaleError> {
    if width == 0 || height == 0 {
        return Err(ScaleError::InvalidDimensions { width, height });
    }
    if src.is_empty() {
        return Err(ScaleError::InvalidDimensions {
            width: src.width(),
            height: src.height(),
        });
    }

    // Fast path: if dimensions match, nearest is a copy
    if algorithm == ScaleAlgorithm::Nearest && src.width() == width && src.height() == height {
        return Ok(src.clone());
    }

    let mut dst = RasterBuffer::blank(width, height);
    scale_image_data(src, &mut dst, algorithm);
    Ok(dst)
}

fn check_len(buffer: &'static str, data: &[u8], width: u32, height: u32) -> Result<(), ScaleError> {
    let expected = byte_len(width, height);
    if data.len() != expected {
        return Err(ScaleError::BufferSizeMismatch {
            buffer,
            expected,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Destination → source coordinate mapping shared by all algorithms.
#[derive(Debug, Clone, Copy)]
struct SampleGrid {
    src_width: usize,
    src_height: usize,
    dst_width: usize,
    scale_w: f64,
    scale_h: f64,
}

impl SampleGrid {
    fn new(src_width: u32, src_height: u32, dst_width: u32, dst_height: u32) -> Self {
        Self {
            src_width: src_width as usize,
            src_height: src_height as usize,
            dst_width: dst_width as usize,
            scale_w: dst_width as f64 / src_width as f64,
            scale_h: dst_height as f64 / src_height as f64,
        }
    }

    /// Integer source column and fractional remainder `u`.
    #[inline]
    fn column(&self, dst_col: usize) -> (usize, f64) {
        split(dst_col as f64 / self.scale_w, self.src_width)
    }

    /// Integer source row and fractional remainder `v`.
    #[inline]
    fn row(&self, dst_row: usize) -> (usize, f64) {
        split(dst_row as f64 / self.scale_h, self.src_height)
    }

    /// Byte offset of a source pixel, clamping row/col to the image.
    #[inline]
    fn clamped_offset(&self, row: isize, col: isize) -> usize {
        let row = row.clamp(0, self.src_height as isize - 1) as usize;
        let col = col.clamp(0, self.src_width as isize - 1) as usize;
        (row * self.src_width + col) * CHANNELS
    }

    /// Bytes per destination row.
    #[inline]
    fn dst_stride(&self) -> usize {
        self.dst_width * CHANNELS
    }
}

#[inline]
fn split(coord: f64, len: usize) -> (usize, f64) {
    let coord = coord.min(len as f64 - 1.0);
    let int = coord.floor();
    (int as usize, coord - int)
}

/// Clamp an interpolated value into a channel byte.
#[inline]
fn to_channel(value: f64) -> u8 {
    // NaN saturates to 0
    value.clamp(0.0, 255.0).round_ties_even() as u8
}


// ============================================================================
// Property-Based Tests
// ============================================================================
