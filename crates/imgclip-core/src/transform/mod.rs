//! Geometry shared by the clip widget: quarter-turn rotation, the
//! display ↔ source coordinate mapping, and region extraction.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, x grows right, y grows down
//! - *Display* coordinates are CSS pixels on the rotated canvas the user sees
//! - *Source* coordinates are in the unrotated image frame; multiplied by the
//!   pixel ratio they address backing-store pixels
//! - Rotation steps are clockwise quarter turns

mod crop;
mod rect;
mod rotation;

pub use crop::{extract_region, pixel_region};
pub use rect::{Point, Rect};
pub use rotation::{
    apply_rotation, point_to_source, rect_to_source, DisplayTransform, RotationStep,
};
