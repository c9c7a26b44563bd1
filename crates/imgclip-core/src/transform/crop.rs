//! Sub-region extraction.
//!
//! Regions are given in source-image pixel coordinates and may be
//! fractional or partly outside the image; they are rounded to whole pixels
//! and clipped to the image bounds before copying.

use crate::raster::{RasterBuffer, RasterError, CHANNELS};
use super::Rect;

/// Copy the pixels covered by `region` into a new image.
///
/// # Behavior
///
/// - Edges are rounded to the nearest pixel
/// - The region is clipped to the image bounds
/// - A region that covers no pixel returns `RasterError::EmptyRegion`
/// - A region covering the whole image returns a copy of it
pub fn extract_region(image: &RasterBuffer, region: Rect) -> Result<RasterBuffer, RasterError> {
    if image.is_empty() {
        return Err(RasterError::InvalidDimensions {
            width: image.width(),
            height: image.height(),
        });
    }

    let Some((left, top, right, bottom)) = pixel_bounds(image, region) else {
        return Err(RasterError::EmptyRegion);
    };

    // Fast path: full image
    if left == 0 && top == 0 && right == image.width() && bottom == image.height() {
        return Ok(image.clone());
    }

    let out_width = right - left;
    let out_height = bottom - top;
    let row_bytes = out_width as usize * CHANNELS;
    let src_stride = image.width() as usize * CHANNELS;

    let mut output = Vec::with_capacity(row_bytes * out_height as usize);
    let src = image.pixels();

    // Copy row slices; the rows of a region are contiguous in the source
    for y in top..bottom {
        let start = y as usize * src_stride + left as usize * CHANNELS;
        output.extend_from_slice(&src[start..start + row_bytes]);
    }

    RasterBuffer::new(out_width, out_height, output)
}

/// Whole-pixel rectangle [`extract_region`] copies for `region`, or `None`
/// when it covers no pixel of `image`.
pub fn pixel_region(image: &RasterBuffer, region: Rect) -> Option<Rect> {
    let (left, top, right, bottom) = pixel_bounds(image, region)?;
    Some(Rect::new(
        left as f64,
        top as f64,
        (right - left) as f64,
        (bottom - top) as f64,
    ))
}

fn pixel_bounds(image: &RasterBuffer, region: Rect) -> Option<(u32, u32, u32, u32)> {
    let region = region.normalized();
    let img_w = image.width() as f64;
    let img_h = image.height() as f64;

    let left = region.x.round().clamp(0.0, img_w) as u32;
    let top = region.y.round().clamp(0.0, img_h) as u32;
    let right = region.right().round().clamp(0.0, img_w) as u32;
    let bottom = region.bottom().round().clamp(0.0, img_h) as u32;

    if right <= left || bottom <= top {
        return None;
    }
    Some((left, top, right, bottom))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Output is bounded by the input and keeps the length invariant.
        #[test]
        fn prop_region_bounded_by_input(
            (width, height) in (1u32..=40, 1u32..=40),
            (x, y, w, h) in (-20.0f64..60.0, -20.0f64..60.0, 0.0f64..60.0, 0.0f64..60.0),
        ) {
            let img = RasterBuffer::filled(width, height, [1, 2, 3, 4]);
            if let Ok(result) = extract_region(&img, Rect::new(x, y, w, h)) {
                prop_assert!(result.width() >= 1 && result.width() <= width);
                prop_assert!(result.height() >= 1 && result.height() <= height);
                prop_assert_eq!(
                    result.pixels().len(),
                    (result.width() * result.height() * 4) as usize
                );
            }
        }
    }
}
