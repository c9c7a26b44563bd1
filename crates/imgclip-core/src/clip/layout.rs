//! Display canvas geometry.

use serde::{Deserialize, Serialize};

/// Size and placement of the display canvas.
///
/// The canvas spans the container width and keeps the displayed image's
/// aspect ratio. When that would exceed the maximum CSS height, it is
/// shrunk to that height and centred with a left margin. The backing store
/// has `pixel_ratio` times the CSS size, truncated to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasLayout {
    pub css_width: f64,
    pub css_height: f64,
    /// Horizontal offset of the canvas inside the container
    pub margin_left: f64,
    pub backing_width: u32,
    pub backing_height: u32,
    /// Backing pixels per image pixel
    pub scale: f64,
}

impl CanvasLayout {
    /// # Arguments
    ///
    /// * `container_width` - Available width in CSS pixels
    /// * `displayed_image` - Image size as displayed (swapped for odd rotations)
    /// * `max_css_height` - Height cap, 0 for none
    /// * `pixel_ratio` - CSS pixel → backing pixel factor
    pub fn new(container_width: f64, displayed_image: (f64, f64), max_css_height: f64, pixel_ratio: f64) -> Self {
        let (image_width, image_height) = displayed_image;
        let aspect = image_width / image_height;

        let mut css_width = container_width;
        let mut css_height = css_width / aspect;
        if max_css_height > 0.0 && css_height > max_css_height {
            css_height = max_css_height;
            css_width = css_height * aspect;
        }

        let backing_width = (css_width * pixel_ratio) as u32;
        let backing_height = (css_height * pixel_ratio) as u32;

        Self {
            css_width,
            css_height,
            margin_left: (container_width - css_width) / 2.0,
            backing_width,
            backing_height,
            scale: backing_width as f64 / image_width,
        }
    }

    pub fn css_size(&self) -> (f64, f64) {
        (self.css_width, self.css_height)
    }

    pub fn backing_size(&self) -> (f64, f64) {
        (self.backing_width as f64, self.backing_height as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fills_container_width() {
        let layout = CanvasLayout::new(300.0, (1200.0, 800.0), 0.0, 2.0);
        assert_eq!(layout.css_size(), (300.0, 200.0));
        assert_eq!(layout.margin_left, 0.0);
        assert_eq!((layout.backing_width, layout.backing_height), (600, 400));
        assert_eq!(layout.scale, 0.5);
    }

    #[test]
    fn test_max_css_height_centres_canvas() {
        let layout = CanvasLayout::new(300.0, (1000.0, 2000.0), 300.0, 1.0);
        assert_eq!(layout.css_size(), (150.0, 300.0));
        assert_eq!(layout.margin_left, 75.0);
        assert_eq!((layout.backing_width, layout.backing_height), (150, 300));
        assert_eq!(layout.scale, 0.15);
    }

    #[test]
    fn test_backing_truncated() {
        let layout = CanvasLayout::new(333.0, (1000.0, 1000.0), 0.0, 1.5);
        assert_eq!((layout.backing_width, layout.backing_height), (499, 499));
    }
}
