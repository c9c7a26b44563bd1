//! Quarter-turn rotation state and the display ↔ source coordinate mapping.
//!
//! The display canvas draws the image through a rotated context so the user
//! always sees it upright. Anything the user selects is therefore expressed in
//! the rotated *display* frame and has to be mapped back to the unrotated
//! *source* frame before it can address source pixels.
//!
//! # Mapping
//!
//! With `W`/`H` the display canvas size, a display rectangle with edges
//! `left, top, right, bottom` maps to:
//!
//! ```text
//! step 0 (0°):   x = left,       y = top,        size w × h
//! step 1 (90°):  x = top,        y = W - right,  size h × w
//! step 2 (180°): x = W - right,  y = H - bottom, size w × h
//! step 3 (270°): x = H - bottom, y = left,       size h × w
//! ```
//!
//! The inverse of step `r` is step `(4 - r) % 4` evaluated in the source frame,
//! whose size is `H × W` for odd steps.

use super::{Point, Rect};
use crate::raster::RasterBuffer;

/// Clockwise quarter-turn rotation applied to the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationStep {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl RotationStep {
    /// Build from any integer step, wrapping modulo 4.
    pub fn from_index(step: i32) -> Self {
        match step.rem_euclid(4) {
            0 => RotationStep::Deg0,
            1 => RotationStep::Deg90,
            2 => RotationStep::Deg180,
            _ => RotationStep::Deg270,
        }
    }

    /// Step index in `0..=3`.
    pub fn index(self) -> u8 {
        match self {
            RotationStep::Deg0 => 0,
            RotationStep::Deg90 => 1,
            RotationStep::Deg180 => 2,
            RotationStep::Deg270 => 3,
        }
    }

    /// Rotation in degrees, clockwise.
    pub fn degrees(self) -> u32 {
        self.index() as u32 * 90
    }

    /// The next step one quarter turn clockwise or counter-clockwise.
    pub fn rotated(self, clockwise: bool) -> Self {
        let delta = if clockwise { 1 } else { -1 };
        Self::from_index(self.index() as i32 + delta)
    }

    /// The step that undoes this one.
    pub fn inverse(self) -> Self {
        Self::from_index(4 - self.index() as i32)
    }

    /// Returns true for 90° and 270°, which swap width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, RotationStep::Deg90 | RotationStep::Deg270)
    }

    /// Swap `(width, height)` when this step turns the frame sideways.
    pub fn oriented<T>(self, width: T, height: T) -> (T, T) {
        if self.swaps_dimensions() {
            (height, width)
        } else {
            (width, height)
        }
    }
}

/// Map a display-frame rectangle into the unrotated source frame.
///
/// `canvas_width`/`canvas_height` are the display canvas dimensions in the
/// same units as `rect`.
pub fn rect_to_source(rect: Rect, canvas_width: f64, canvas_height: f64, step: RotationStep) -> Rect {
    match step {
        RotationStep::Deg0 => rect,
        RotationStep::Deg90 => Rect::new(
            rect.y,
            canvas_width - rect.right(),
            rect.height,
            rect.width,
        ),
        RotationStep::Deg180 => Rect::new(
            canvas_width - rect.right(),
            canvas_height - rect.bottom(),
            rect.width,
            rect.height,
        ),
        RotationStep::Deg270 => Rect::new(
            canvas_height - rect.bottom(),
            rect.x,
            rect.height,
            rect.width,
        ),
    }
}

/// Map a display-frame point into the unrotated source frame.
pub fn point_to_source(point: Point, canvas_width: f64, canvas_height: f64, step: RotationStep) -> Point {
    match step {
        RotationStep::Deg0 => point,
        RotationStep::Deg90 => Point::new(point.y, canvas_width - point.x),
        RotationStep::Deg180 => Point::new(canvas_width - point.x, canvas_height - point.y),
        RotationStep::Deg270 => Point::new(canvas_height - point.y, point.x),
    }
}

/// Rotation-aware transform between the display canvas (CSS pixels) and the
/// source frame in backing-store pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayTransform {
    /// Display canvas width in CSS pixels.
    pub canvas_width: f64,
    /// Display canvas height in CSS pixels.
    pub canvas_height: f64,
    /// Current display rotation.
    pub step: RotationStep,
    /// CSS pixel → backing pixel factor.
    pub pixel_ratio: f64,
}

impl DisplayTransform {
    pub fn new(canvas_width: f64, canvas_height: f64, step: RotationStep, pixel_ratio: f64) -> Self {
        Self {
            canvas_width,
            canvas_height,
            step,
            pixel_ratio,
        }
    }

    /// Size of the source frame in CSS pixels.
    fn source_frame(&self) -> (f64, f64) {
        self.step.oriented(self.canvas_width, self.canvas_height)
    }

    /// Display rectangle (CSS) → source rectangle (backing pixels).
    pub fn to_source_rect(&self, rect: Rect) -> Rect {
        rect_to_source(rect, self.canvas_width, self.canvas_height, self.step).scaled(self.pixel_ratio)
    }

    /// Display point (CSS) → source point (backing pixels).
    pub fn to_source_point(&self, point: Point) -> Point {
        point_to_source(point, self.canvas_width, self.canvas_height, self.step).scaled(self.pixel_ratio)
    }

    /// Source rectangle (backing pixels) → display rectangle (CSS).
    pub fn to_display_rect(&self, rect: Rect) -> Rect {
        let (w, h) = self.source_frame();
        rect_to_source(rect.scaled(1.0 / self.pixel_ratio), w, h, self.step.inverse())
    }

    /// Source point (backing pixels) → display point (CSS).
    pub fn to_display_point(&self, point: Point) -> Point {
        let (w, h) = self.source_frame();
        point_to_source(point.scaled(1.0 / self.pixel_ratio), w, h, self.step.inverse())
    }
}

/// Rotate an image clockwise by a quarter-turn step.
///
/// Used to turn an exported source-frame region upright so it matches what
/// the user saw on the display.
pub fn apply_rotation(image: &RasterBuffer, step: RotationStep) -> RasterBuffer {
    // Fast path: no rotation needed
    if step == RotationStep::Deg0 || image.is_empty() {
        return image.clone();
    }

    let Some(rgba) = image.to_rgba_image() else {
        return image.clone();
    };

    let rotated = match step {
        RotationStep::Deg90 => image::imageops::rotate90(&rgba),
        RotationStep::Deg180 => image::imageops::rotate180(&rgba),
        RotationStep::Deg270 => image::imageops::rotate270(&rgba),
        RotationStep::Deg0 => rgba,
    };

    RasterBuffer::from_rgba_image(rotated)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
