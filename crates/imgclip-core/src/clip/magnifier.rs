//! Magnified view around the pointer while a handle is dragged.

use crate::raster::RasterBuffer;
use crate::transform::{apply_rotation, Point, Rect, RotationStep};
use serde::{Deserialize, Serialize};

/// What the magnifier shows and where.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MagnifierFrame {
    /// Captured region in image pixels
    pub source: Rect,
    /// Where the region lands on the magnifier, in its pixels
    pub dest: Rect,
    pub width: u32,
    pub height: u32,
}

impl MagnifierFrame {
    /// Frame for a capture centred on `center` (source frame, backing pixels).
    ///
    /// # Arguments
    ///
    /// * `capture_radius` - Half-size of the captured square in backing pixels
    /// * `scale` - Backing pixels per image pixel
    /// * `pixel_ratio` - Magnifier canvas is `2 * capture_radius * pixel_ratio` wide
    /// * `clamp_origin` - Shift negative capture offsets into the destination
    ///   instead (iOS Safari cannot draw from negative source offsets)
    pub fn new(center: Point, capture_radius: f64, scale: f64, pixel_ratio: f64, clamp_origin: bool) -> Self {
        let side = (capture_radius * 2.0 * pixel_ratio) as u32;
        let (mag_w, mag_h) = (side as f64, side as f64);
        let capture = capture_radius * 2.0;

        let mut src_x = center.x - capture_radius;
        let mut src_y = center.y - capture_radius;
        let mut draw_x = 0.0;
        let mut draw_y = 0.0;

        if clamp_origin {
            if src_y < 0.0 {
                draw_y = mag_h / 2.0 * (src_y / capture_radius).abs();
                src_y = 0.0;
            }
            if src_x < 0.0 {
                draw_x = mag_w / 2.0 * (src_x / capture_radius).abs();
                src_x = 0.0;
            }
        }

        Self {
            source: Rect::new(src_x, src_y, capture, capture).scaled(1.0 / scale),
            dest: Rect::new(draw_x, draw_y, mag_w, mag_h),
            width: side,
            height: side,
        }
    }

    /// Draw the frame from `image`, turned to match the display rotation.
    ///
    /// Magnifier pixels outside `dest` or mapping outside the image stay
    /// transparent.
    pub fn render(&self, image: &RasterBuffer, step: RotationStep) -> RasterBuffer {
        let mut out = RasterBuffer::blank(self.width, self.height);
        if self.dest.is_empty() || image.is_empty() {
            return out;
        }

        let (img_w, img_h) = (image.width() as f64, image.height() as f64);
        let sx = self.source.width / self.dest.width;
        let sy = self.source.height / self.dest.height;

        for y in 0..self.height {
            let dy = y as f64 + 0.5 - self.dest.y;
            if dy < 0.0 || dy >= self.dest.height {
                continue;
            }
            let src_y = (self.source.y + dy * sy).floor();
            if src_y < 0.0 || src_y >= img_h {
                continue;
            }

            for x in 0..self.width {
                let dx = x as f64 + 0.5 - self.dest.x;
                if dx < 0.0 || dx >= self.dest.width {
                    continue;
                }
                let src_x = (self.source.x + dx * sx).floor();
                if src_x < 0.0 || src_x >= img_w {
                    continue;
                }
                out.put_pixel(x, y, image.pixel_clamped(src_x as i64, src_y as i64));
            }
        }

        apply_rotation(&out, step)
    }
}
