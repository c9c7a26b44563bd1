//! One-shot scaling to a data URL.

use super::{resize, ScaleAlgorithm, ScaleError};
use crate::encode::{encode_data_url, OutputMime};
use crate::raster::RasterBuffer;
use serde::{Deserialize, Serialize};

/// Export quality for scaled images.
const SCALE_QUALITY: f64 = 0.9;

/// Options for [`scale_image`].
///
/// Deserializes from a JS object; missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScaleConfig {
    /// Target width in pixels
    pub width: u32,
    /// Target height in pixels
    pub height: u32,
    /// Output format
    pub mime: OutputMime,
    /// Resampling algorithm, read from the numeric `processType`
    #[serde(rename = "processType")]
    pub algorithm: ScaleAlgorithm,
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 80,
            mime: OutputMime::Png,
            algorithm: ScaleAlgorithm::default(),
        }
    }
}

/// Resample `image` to the configured size and encode it as a data URL.
///
/// # Errors
///
/// `ScaleError::InvalidDimensions` for an empty source or zero target size,
/// `ScaleError::Encode` if encoding fails.
pub fn scale_image(image: &RasterBuffer, config: &ScaleConfig) -> Result<String, ScaleError> {
    let scaled = resize(image, config.width, config.height, config.algorithm)?;
    Ok(encode_data_url(&scaled, config.mime, SCALE_QUALITY)?)
}
