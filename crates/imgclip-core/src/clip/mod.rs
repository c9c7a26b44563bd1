//! Interactive clip widget model.
//!
//! [`ImgClip`] holds everything the on-page widget needs apart from the DOM:
//! the display canvas layout, the rotation, the crop selection and its drag
//! state, the magnifier, the size tip and the last export. The page forwards
//! pointer events in canvas CSS pixels and draws from the read-only views.
//!
//! # Export pipeline
//!
//! 1. Selection (display frame) → source rectangle in backing pixels
//! 2. Backing pixels → image pixels, region extracted from the image
//! 3. Region resampled to the export size from the size policy
//! 4. Result rotated upright and encoded as a `data:` URL

mod layout;
mod magnifier;
mod options;
mod widget;

pub use layout::CanvasLayout;
pub use magnifier::MagnifierFrame;
pub use options::{ClipOptions, ClipShape, TipsStyle};
pub use widget::ImgClip;

use crate::encode::EncodeError;
use crate::raster::RasterError;
use crate::scale::ScaleError;
use thiserror::Error;

/// Errors raised by the clip widget.
#[derive(Debug, Error)]
pub enum ClipError {
    /// Image has no pixels
    #[error("Image is empty: {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// Neither container nor viewport has a usable width
    #[error("Invalid container: width {width} must be positive")]
    InvalidContainer { width: f64 },

    #[error("Invalid option {name}: {reason}")]
    InvalidOption {
        name: &'static str,
        reason: &'static str,
    },

    /// The selection exports to less than one pixel
    #[error("Selection is empty")]
    EmptySelection,

    #[error(transparent)]
    Raster(#[from] RasterError),

    #[error(transparent)]
    Scale(#[from] ScaleError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}
