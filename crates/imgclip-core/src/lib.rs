//! imgclip core - pixel work behind in-browser image scaling and clipping
//!
//! This crate holds everything that does not need a browser: RGBA
//! resampling, rotation-aware crop geometry, output size policy, encoding
//! to `data:` URLs and the state machine of the interactive clip widget.
//!
//! # Module Structure
//!
//! - `raster` - Owned RGBA8 pixel buffer shared by every module
//! - `scale` - Nearest, bilinear and bicubic resampling
//! - `transform` - Quarter-turn rotation, display ↔ source mapping, region extraction
//! - `size` - Host environment, pixel ratio and output size policy
//! - `encode` - PNG/JPEG encoding and `data:` URLs
//! - `compress` - One-shot downscale and re-encode
//! - `crop` - Rectangle and polygon selection gestures
//! - `clip` - The clip widget tying the above together

pub mod clip;
pub mod compress;
pub mod crop;
pub mod encode;
pub mod raster;
pub mod scale;
pub mod size;
pub mod transform;

pub use clip::{ClipError, ClipOptions, ClipShape, ImgClip, TipsStyle};
pub use compress::{compress_image, CompressConfig, CompressError};
pub use encode::{encode_data_url, EncodeError, OutputMime};
pub use raster::{RasterBuffer, RasterError};
pub use scale::{resample, resize, scale_image, scale_image_data, ScaleAlgorithm, ScaleConfig, ScaleError};
pub use size::{HostEnvironment, Platform, SizeLimits};
pub use transform::{apply_rotation, DisplayTransform, Point, Rect, RotationStep};
