//! Export dimension rules.

use super::HostEnvironment;
use crate::transform::RotationStep;
use serde::{Deserialize, Serialize};

/// Caller-supplied bounds on export size. Zero means unset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SizeLimits {
    /// Export at the image's own resolution
    #[serde(rename = "isUseOriginSize", alias = "useOriginSize")]
    pub use_origin_size: bool,
    pub max_width: f64,
    /// Overrides every other width rule
    pub force_width: f64,
    /// Overrides the aspect-derived height; distorts when set
    pub force_height: f64,
}

/// Export dimensions, fractional until a canvas-sized buffer is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputSize {
    pub width: f64,
    pub height: f64,
}

impl OutputSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Pixel dimensions as a canvas would allocate them (truncated).
    ///
    /// Returns `None` when either side is below one pixel or not finite.
    pub fn to_pixels(self) -> Option<(u32, u32)> {
        let w = truncate(self.width)?;
        let h = truncate(self.height)?;
        Some((w, h))
    }
}

fn truncate(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 1.0 && value <= u32::MAX as f64 {
        Some(value as u32)
    } else {
        None
    }
}

/// Export size for a whole image.
///
/// Starts from `viewport_width * pixel_ratio`, capped at the native width
/// (or the native width outright with `use_origin_size`). A `max_width`
/// smaller than both caps it further; `force_width` replaces it. Height
/// keeps the native aspect ratio unless `force_height` is set.
///
/// # Arguments
///
/// * `native_width`, `native_height` - Image dimensions in pixels
/// * `limits` - Size limits
/// * `pixel_ratio` - From [`HostEnvironment::pixel_ratio`]
/// * `host` - Supplies the viewport width
///
/// Zero native dimensions give non-finite sizes; callers check
/// [`OutputSize::to_pixels`].
pub fn compute_size_policy(
    native_width: u32,
    native_height: u32,
    limits: &SizeLimits,
    pixel_ratio: f64,
    host: &HostEnvironment,
) -> OutputSize {
    let native_w = native_width as f64;
    let aspect = native_w / native_height as f64;

    let mut width = host.viewport_width * pixel_ratio;
    if limits.use_origin_size || width > native_w {
        width = native_w;
    }

    let max_width = limits.max_width;
    if max_width > 0.0 && native_w > max_width && width > max_width {
        width = max_width;
    }

    if limits.force_width > 0.0 {
        width = limits.force_width;
    }

    let height = if limits.force_height > 0.0 {
        limits.force_height
    } else {
        width / aspect
    };

    OutputSize::new(width, height)
}

/// Export size for a crop of the clip canvas.
///
/// # Arguments
///
/// * `crop` - Crop size in backing pixels, unrotated frame
/// * `canvas` - Canvas backing size as displayed (rotated frame)
/// * `image` - Image size in pixels
/// * `step` - Current rotation
/// * `limits` - Size limits
///
/// # Behavior
///
/// The crop keeps its backing-pixel size unless the canvas has more pixels
/// than the image (or `use_origin_size`), in which case it maps to image
/// pixels. `max_width` and `force_width` rescale relative to the full image
/// width, so a crop of half the canvas exports at half the limit.
pub fn crop_output_size(
    crop: OutputSize,
    canvas: (f64, f64),
    image: (u32, u32),
    step: RotationStep,
    limits: &SizeLimits,
) -> OutputSize {
    // Work in the unrotated frame so the width axes line up
    let (canvas_w, canvas_h) = step.oriented(canvas.0, canvas.1);
    let (image_w, image_h) = (image.0 as f64, image.1 as f64);
    let aspect = canvas_w / canvas_h;

    let mut size = crop;

    if limits.use_origin_size || canvas_w > image_w {
        size = OutputSize::new(image_w * crop.width / canvas_w, image_h * crop.height / canvas_h);
    }

    let max_width = limits.max_width;
    if max_width > 0.0 && canvas_w > max_width && max_width < image_w {
        size = OutputSize::new(
            max_width * crop.width / canvas_w,
            max_width / aspect * crop.height / canvas_h,
        );
    }

    if limits.force_width > 0.0 {
        let full_height = if limits.force_height > 0.0 {
            limits.force_height
        } else {
            limits.force_width / aspect
        };
        size = OutputSize::new(
            limits.force_width * crop.width / canvas_w,
            full_height * crop.height / canvas_h,
        );
    }

    size
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host(viewport: f64) -> HostEnvironment {
        HostEnvironment {
            viewport_width: viewport,
            ..Default::default()
        }
    }

    #[test]
    fn test_viewport_times_ratio() {
        let size = compute_size_policy(2000, 1000, &SizeLimits::default(), 2.0, &host(375.0));
        assert_eq!(size, OutputSize::new(750.0, 375.0));
    }

    #[test]
    fn test_capped_at_native_width() {
        let size = compute_size_policy(500, 250, &SizeLimits::default(), 2.0, &host(375.0));
        assert_eq!(size, OutputSize::new(500.0, 250.0));
    }

    #[test]
    fn test_max_width() {
        let limits = SizeLimits {
            max_width: 100.0,
            ..Default::default()
        };
        let size = compute_size_policy(500, 250, &limits, 2.0, &host(375.0));
        assert_eq!(size, OutputSize::new(100.0, 50.0));
    }

    #[test]
    fn test_max_width_ignored_for_small_images() {
        let limits = SizeLimits {
            max_width: 1000.0,
            ..Default::default()
        };
        let size = compute_size_policy(500, 250, &limits, 2.0, &host(375.0));
        assert_eq!(size.width, 500.0);
    }

    #[test]
    fn test_force_width_wins() {
        let limits = SizeLimits {
            max_width: 100.0,
            force_width: 50.0,
            ..Default::default()
        };
        let size = compute_size_policy(500, 250, &limits, 2.0, &host(375.0));
        assert_eq!(size, OutputSize::new(50.0, 25.0));

        let limits = SizeLimits {
            force_width: 50.0,
            force_height: 70.0,
            ..Default::default()
        };
        let size = compute_size_policy(500, 250, &limits, 2.0, &host(375.0));
        assert_eq!(size, OutputSize::new(50.0, 70.0));
    }

    #[test]
    fn test_use_origin_size() {
        let limits = SizeLimits {
            use_origin_size: true,
            ..Default::default()
        };
        let size = compute_size_policy(4000, 2000, &limits, 1.0, &host(375.0));
        assert_eq!(size, OutputSize::new(4000.0, 2000.0));
    }

    #[test]
    fn test_zero_native_is_not_finite() {
        let size = compute_size_policy(0, 0, &SizeLimits::default(), 1.0, &host(375.0));
        assert_eq!(size.to_pixels(), None);
    }

    #[test]
    fn test_to_pixels_truncates() {
        assert_eq!(OutputSize::new(99.9, 1.2).to_pixels(), Some((99, 1)));
        assert_eq!(OutputSize::new(0.5, 10.0).to_pixels(), None);
        assert_eq!(OutputSize::new(f64::INFINITY, 10.0).to_pixels(), None);
    }

    #[test]
    fn test_crop_keeps_backing_size_for_large_images() {
        // Canvas 750x500 backing, image 3000x2000
        let size = crop_output_size(
            OutputSize::new(300.0, 200.0),
            (750.0, 500.0),
            (3000, 2000),
            RotationStep::Deg0,
            &SizeLimits::default(),
        );
        assert_eq!(size, OutputSize::new(300.0, 200.0));
    }

    #[test]
    fn test_crop_maps_to_image_pixels_when_canvas_larger() {
        // Canvas 750x500 backing, image 300x200
        let size = crop_output_size(
            OutputSize::new(375.0, 250.0),
            (750.0, 500.0),
            (300, 200),
            RotationStep::Deg0,
            &SizeLimits::default(),
        );
        assert_eq!(size, OutputSize::new(150.0, 100.0));
    }

    #[test]
    fn test_crop_rotated_frame() {
        // Rotated canvas 500x750 shows a 3000x2000 image sideways
        let limits = SizeLimits {
            use_origin_size: true,
            ..Default::default()
        };
        let size = crop_output_size(
            OutputSize::new(750.0, 500.0),
            (500.0, 750.0),
            (3000, 2000),
            RotationStep::Deg90,
            &limits,
        );
        assert_eq!(size, OutputSize::new(3000.0, 2000.0));
    }

    #[test]
    fn test_crop_max_and_force_width() {
        let limits = SizeLimits {
            max_width: 600.0,
            ..Default::default()
        };
        let size = crop_output_size(
            OutputSize::new(375.0, 500.0),
            (750.0, 500.0),
            (3000, 2000),
            RotationStep::Deg0,
            &limits,
        );
        assert_eq!(size, OutputSize::new(300.0, 400.0));

        let limits = SizeLimits {
            force_width: 150.0,
            ..Default::default()
        };
        let size = crop_output_size(
            OutputSize::new(750.0, 250.0),
            (750.0, 500.0),
            (3000, 2000),
            RotationStep::Deg180,
            &limits,
        );
        assert_eq!(size, OutputSize::new(150.0, 50.0));
    }
}
