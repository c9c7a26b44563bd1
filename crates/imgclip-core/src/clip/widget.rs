//! The clip widget state machine.

use super::{CanvasLayout, ClipError, ClipOptions, ClipShape, MagnifierFrame, TipsStyle};
use crate::crop::{contains_point, DragState, Handle, PolygonCrop, RectCrop};
use crate::encode::encode_data_url;
use crate::raster::{RasterBuffer, CHANNELS};
use crate::scale::{self, ScaleAlgorithm};
use crate::size::{crop_output_size, HostEnvironment, OutputSize, Platform};
use crate::transform::{
    apply_rotation, extract_region, pixel_region, point_to_source, DisplayTransform, Point, Rect,
    RotationStep,
};

#[derive(Debug, Clone)]
enum Selection {
    Rect(RectCrop),
    Polygon(PolygonCrop),
}

impl Selection {
    fn new(options: &ClipOptions, layout: &CanvasLayout) -> Self {
        match options.shape {
            ClipShape::Rectangle => Selection::Rect(RectCrop::new(
                layout.css_width,
                layout.css_height,
                options.is_constrain,
                options.min_move_diff,
            )),
            ClipShape::Polygon => {
                let (w, h) = layout.backing_size();
                Selection::Polygon(PolygonCrop::new(
                    w,
                    h,
                    options.is_constrain,
                    options.choose_point_radius,
                ))
            }
        }
    }

    /// Adopt a new canvas size and select all of it.
    fn reset(&mut self, layout: &CanvasLayout) {
        match self {
            Selection::Rect(rect) => {
                rect.set_bounds(layout.css_width, layout.css_height);
                rect.reset_to_full();
            }
            Selection::Polygon(polygon) => {
                let (w, h) = layout.backing_size();
                polygon.set_bounds(w, h);
                polygon.reset_to_full();
            }
        }
    }

    fn drag_state(&self) -> DragState {
        match self {
            Selection::Rect(rect) => rect.drag_state(),
            Selection::Polygon(polygon) => polygon
                .active_handle()
                .map_or(DragState::Idle, DragState::Resizing),
        }
    }
}

/// Interactive crop/rotate/export widget over one image.
///
/// Pointer positions are CSS pixels relative to the canvas' top-left corner.
#[derive(Debug, Clone)]
pub struct ImgClip {
    image: RasterBuffer,
    options: ClipOptions,
    platform: Platform,
    pixel_ratio: f64,
    container_width: f64,
    step: RotationStep,
    layout: CanvasLayout,
    selection: Selection,
    /// Last pointer position while resizing, display CSS pixels
    cursor: Point,
    magnifier_visible: bool,
    tips_visible: bool,
    clip_data: Option<String>,
}

impl ImgClip {
    /// Build the widget for `image` inside a container measured by `host`.
    ///
    /// # Errors
    ///
    /// * `ClipError::InvalidOption` - an option is out of range
    /// * `ClipError::EmptyImage` - the image has no pixels
    /// * `ClipError::InvalidContainer` - neither container nor viewport has width
    pub fn new(image: RasterBuffer, host: &HostEnvironment, options: ClipOptions) -> Result<Self, ClipError> {
        options.validate()?;

        if image.is_empty() {
            return Err(ClipError::EmptyImage {
                width: image.width(),
                height: image.height(),
            });
        }

        let container_width = host.layout_width();
        if !container_width.is_finite() || container_width <= 0.0 {
            return Err(ClipError::InvalidContainer {
                width: container_width,
            });
        }

        let pixel_ratio = host.pixel_ratio(options.compress_scale_ratio, options.iphone_fixed_ratio);
        let step = RotationStep::Deg0;
        let layout = CanvasLayout::new(
            container_width,
            step.oriented(image.width() as f64, image.height() as f64),
            options.max_css_height,
            pixel_ratio,
        );
        let selection = Selection::new(&options, &layout);
        let tips_visible = options.size_tips_style == TipsStyle::Always;

        log::info!(
            "Clip widget for {}x{} image: canvas {}x{} css, ratio {}",
            image.width(),
            image.height(),
            layout.css_width,
            layout.css_height,
            pixel_ratio
        );

        Ok(Self {
            image,
            options,
            platform: host.platform,
            pixel_ratio,
            container_width,
            step,
            layout,
            selection,
            cursor: Point::default(),
            magnifier_visible: false,
            tips_visible,
            clip_data: None,
        })
    }

    // ------------------------------------------------------------------
    // Read-only views
    // ------------------------------------------------------------------

    pub fn canvas_layout(&self) -> &CanvasLayout {
        &self.layout
    }

    pub fn rotation(&self) -> RotationStep {
        self.step
    }

    pub fn pixel_ratio(&self) -> f64 {
        self.pixel_ratio
    }

    pub fn options(&self) -> &ClipOptions {
        &self.options
    }

    pub fn image(&self) -> &RasterBuffer {
        &self.image
    }

    pub fn drag_state(&self) -> DragState {
        self.selection.drag_state()
    }

    pub fn is_tips_visible(&self) -> bool {
        self.tips_visible
    }

    pub fn is_magnifier_visible(&self) -> bool {
        self.magnifier_visible
    }

    /// Last clip result, if any.
    pub fn clip_img_data(&self) -> Option<&str> {
        self.clip_data.as_deref()
    }

    /// Selection bounds in display CSS pixels relative to the canvas.
    pub fn crop_rect(&self) -> Rect {
        match &self.selection {
            Selection::Rect(rect) => rect.rect(),
            Selection::Polygon(polygon) => {
                let r = polygon.bounding_rect();
                let (fx, fy) = self.backing_per_css();
                Rect::new(r.x / fx, r.y / fy, r.width / fx, r.height / fy)
            }
        }
    }

    /// Polygon outline in display CSS pixels, drawing order.
    pub fn polygon_outline(&self) -> Option<[Point; 8]> {
        let Selection::Polygon(polygon) = &self.selection else {
            return None;
        };
        let (fx, fy) = self.backing_per_css();
        Some(polygon.outline().map(|p| Point::new(p.x / fx, p.y / fy)))
    }

    /// Selection bounds in the unrotated frame, backing pixels.
    pub fn source_rect(&self) -> Rect {
        match &self.selection {
            Selection::Rect(rect) => self.transform().to_source_rect(rect.rect()),
            Selection::Polygon(polygon) => Rect::bounding(&self.source_outline(polygon)),
        }
    }

    /// Export size the current selection would produce, as `"W*H"`.
    pub fn size_tip(&self) -> String {
        let size = self.export_size(self.source_rect());
        format!("{}*{}", size.width.round(), size.height.round())
    }

    /// Magnifier capture around the last pointer position.
    pub fn magnifier_frame(&self) -> MagnifierFrame {
        let center = self.transform().to_source_point(self.cursor);
        MagnifierFrame::new(
            center,
            self.options.capture_radius,
            self.layout.scale,
            self.pixel_ratio,
            self.platform.is_ios,
        )
    }

    pub fn render_magnifier(&self) -> RasterBuffer {
        self.magnifier_frame().render(&self.image, self.step)
    }

    // ------------------------------------------------------------------
    // Pointer input
    // ------------------------------------------------------------------

    /// Pointer pressed on a selection handle.
    ///
    /// Ignored while the rectangle body is being moved.
    pub fn press_handle(&mut self, handle: Handle, pointer: Point) {
        match &mut self.selection {
            Selection::Rect(rect) => {
                if !rect.begin_resize(handle, pointer) {
                    return;
                }
                self.cursor = rect.clamp_pointer(pointer);
            }
            Selection::Polygon(polygon) => {
                polygon.begin_resize(handle);
                self.cursor = self.clamped_polygon_cursor(pointer);
            }
        }
        self.show_resize_feedback();
    }

    /// Pointer pressed on the canvas itself.
    ///
    /// For a polygon selection this grabs the point under the pointer, if
    /// any. Rectangles are grabbed through their handles and body instead.
    pub fn press_canvas(&mut self, pointer: Point) -> Option<Handle> {
        let backing = self.css_to_backing(pointer);
        let Selection::Polygon(polygon) = &mut self.selection else {
            return None;
        };
        let handle = polygon.press(backing)?;
        self.cursor = self.clamped_polygon_cursor(pointer);
        self.show_resize_feedback();
        Some(handle)
    }

    /// Pointer pressed on the body of a rectangle selection.
    pub fn press_body(&mut self, pointer: Point) {
        if let Selection::Rect(rect) = &mut self.selection {
            rect.begin_move(pointer);
        }
    }

    /// Pointer moved. Returns whether the selection changed.
    pub fn pointer_move(&mut self, pointer: Point) -> bool {
        let backing = self.css_to_backing(pointer);
        match &mut self.selection {
            Selection::Rect(rect) => match rect.drag_state() {
                DragState::Resizing(_) => {
                    self.cursor = rect.clamp_pointer(pointer);
                    rect.update_resize(pointer)
                }
                DragState::Moving => rect.update_move(pointer),
                DragState::Idle => false,
            },
            Selection::Polygon(polygon) => {
                if !polygon.update_resize(backing) {
                    return false;
                }
                self.cursor = self.clamped_polygon_cursor(pointer);
                true
            }
        }
    }

    /// Pointer released: ends any gesture.
    pub fn pointer_up(&mut self) {
        match &mut self.selection {
            Selection::Rect(rect) => {
                rect.end_resize();
                rect.end_move();
            }
            Selection::Polygon(polygon) => polygon.end_resize(),
        }
        self.hide_resize_feedback();
    }

    /// Pointer left the container; same as a release.
    pub fn pointer_leave(&mut self) {
        self.pointer_up();
    }

    /// Gesture interrupted (e.g. `touchcancel`): restore the selection it
    /// started from.
    pub fn cancel_gesture(&mut self) {
        match &mut self.selection {
            Selection::Rect(rect) => rect.cancel(),
            Selection::Polygon(polygon) => polygon.cancel(),
        }
        self.hide_resize_feedback();
    }

    // ------------------------------------------------------------------
    // Layout and rotation
    // ------------------------------------------------------------------

    /// Rotate the display a quarter turn and select the whole canvas.
    pub fn rotate(&mut self, clockwise: bool) {
        self.step = self.step.rotated(clockwise);
        self.layout = self.compute_layout();
        self.selection.reset(&self.layout);
        self.hide_resize_feedback();

        log::info!(
            "Rotated to {} degrees, canvas {}x{} css",
            self.step.degrees(),
            self.layout.css_width,
            self.layout.css_height
        );
    }

    /// Select the whole canvas.
    pub fn reset_selection(&mut self) {
        self.selection.reset(&self.layout);
    }

    /// Lay the canvas out for a new container width, keeping the selection
    /// at the same place on the image.
    pub fn resize_container(&mut self, width: f64) -> Result<(), ClipError> {
        if !width.is_finite() || width <= 0.0 {
            return Err(ClipError::InvalidContainer { width });
        }

        let old = self.layout;
        self.container_width = width;
        self.layout = self.compute_layout();

        match &mut self.selection {
            Selection::Rect(rect) => {
                rect.set_bounds(self.layout.css_width, self.layout.css_height);
                rect.rescale(
                    ratio(self.layout.css_width, old.css_width),
                    ratio(self.layout.css_height, old.css_height),
                );
            }
            Selection::Polygon(polygon) => {
                let (w, h) = self.layout.backing_size();
                let (old_w, old_h) = old.backing_size();
                polygon.set_bounds(w, h);
                polygon.rescale(ratio(w, old_w), ratio(h, old_h));
            }
        }

        log::debug!("Container resized to {}", width);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Export
    // ------------------------------------------------------------------

    /// Export the selection, upright, as a data URL.
    ///
    /// The result is also kept for [`ImgClip::clip_img_data`].
    ///
    /// # Errors
    ///
    /// `ClipError::EmptySelection` when the selection exports to less than
    /// a pixel; the previous result is kept in that case.
    pub fn clip(&mut self) -> Result<&str, ClipError> {
        let source = self.source_rect();
        let (width, height) = self
            .export_size(source)
            .to_pixels()
            .ok_or(ClipError::EmptySelection)?;

        let scale = self.layout.scale;
        let requested = source.scaled(1.0 / scale).normalized();
        let visible = visible_part(requested, &self.image);
        let bounds = pixel_region(&self.image, visible).ok_or(ClipError::EmptySelection)?;
        let mut region = extract_region(&self.image, bounds)?;

        if let Selection::Polygon(polygon) = &self.selection {
            let outline = self
                .source_outline(polygon)
                .map(|p| Point::new(p.x / scale - bounds.x, p.y / scale - bounds.y));
            mask_outside(&mut region, &outline);
        }

        let algorithm = if self.options.is_smooth {
            ScaleAlgorithm::Bilinear
        } else {
            ScaleAlgorithm::Nearest
        };
        let resized = if visible == requested {
            scale::resize(&region, width, height, algorithm)?
        } else {
            // Selection reaches past the image: keep the image at the export
            // scale and leave the rest transparent
            let fx = width as f64 / requested.width;
            let fy = height as f64 / requested.height;
            let part_width = (visible.width * fx).round() as u32;
            let part_height = (visible.height * fy).round() as u32;

            let mut canvas = RasterBuffer::blank(width, height);
            if part_width > 0 && part_height > 0 {
                let part = scale::resize(&region, part_width, part_height, algorithm)?;
                let x = ((visible.x - requested.x) * fx).round() as u32;
                let y = ((visible.y - requested.y) * fy).round() as u32;
                paste(&mut canvas, &part, x, y);
            }
            canvas
        };
        let upright = apply_rotation(&resized, self.step);
        let url = encode_data_url(&upright, self.options.mime, self.options.quality)?;

        log::info!(
            "Clipped {}x{} region to {}x{} {}",
            region.width(),
            region.height(),
            upright.width(),
            upright.height(),
            self.options.mime.as_str()
        );

        Ok(self.clip_data.insert(url).as_str())
    }

    /// Tear the widget down, releasing the image and every buffer it owns.
    pub fn destroy(self) {
        log::info!("Clip widget destroyed");
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn compute_layout(&self) -> CanvasLayout {
        CanvasLayout::new(
            self.container_width,
            self.step
                .oriented(self.image.width() as f64, self.image.height() as f64),
            self.options.max_css_height,
            self.pixel_ratio,
        )
    }

    fn transform(&self) -> DisplayTransform {
        DisplayTransform::new(
            self.layout.css_width,
            self.layout.css_height,
            self.step,
            self.pixel_ratio,
        )
    }

    fn export_size(&self, source: Rect) -> OutputSize {
        crop_output_size(
            OutputSize::new(source.width, source.height),
            self.layout.backing_size(),
            (self.image.width(), self.image.height()),
            self.step,
            &self.options.limits,
        )
    }

    /// Polygon outline mapped into the unrotated frame, backing pixels.
    fn source_outline(&self, polygon: &PolygonCrop) -> [Point; 8] {
        let (w, h) = self.layout.backing_size();
        polygon
            .outline()
            .map(|p| point_to_source(p, w, h, self.step))
    }

    fn backing_per_css(&self) -> (f64, f64) {
        let (w, h) = self.layout.backing_size();
        (
            ratio(w, self.layout.css_width),
            ratio(h, self.layout.css_height),
        )
    }

    fn css_to_backing(&self, point: Point) -> Point {
        let (fx, fy) = self.backing_per_css();
        Point::new(point.x * fx, point.y * fy)
    }

    fn clamped_polygon_cursor(&self, pointer: Point) -> Point {
        let Selection::Polygon(polygon) = &self.selection else {
            return pointer;
        };
        let clamped = polygon.clamp_pointer(self.css_to_backing(pointer));
        let (fx, fy) = self.backing_per_css();
        Point::new(clamped.x / fx, clamped.y / fy)
    }

    fn show_resize_feedback(&mut self) {
        self.magnifier_visible = true;
        if self.options.size_tips_style == TipsStyle::WhileDragging {
            self.tips_visible = true;
        }
    }

    fn hide_resize_feedback(&mut self) {
        self.magnifier_visible = false;
        if self.options.size_tips_style == TipsStyle::WhileDragging {
            self.tips_visible = false;
        }
    }
}

/// `new / old`, or 1 when `old` is degenerate.
fn ratio(new: f64, old: f64) -> f64 {
    if old > 0.0 && old.is_finite() {
        new / old
    } else {
        1.0
    }
}

/// Part of `requested` (image pixels) that lies on the image.
fn visible_part(requested: Rect, image: &RasterBuffer) -> Rect {
    let left = requested.x.max(0.0);
    let top = requested.y.max(0.0);
    let right = requested.right().min(image.width() as f64);
    let bottom = requested.bottom().min(image.height() as f64);
    Rect::new(left, top, (right - left).max(0.0), (bottom - top).max(0.0))
}

/// Copy `src` into `dst` with its top-left corner at (`x`, `y`), clipped to `dst`.
fn paste(dst: &mut RasterBuffer, src: &RasterBuffer, x: u32, y: u32) {
    let cols = src.width().min(dst.width().saturating_sub(x)) as usize;
    let rows = src.height().min(dst.height().saturating_sub(y)) as usize;
    if cols == 0 || rows == 0 {
        return;
    }

    let dst_stride = dst.width() as usize * CHANNELS;
    let src_stride = src.width() as usize * CHANNELS;
    let row_bytes = cols * CHANNELS;
    let offset = x as usize * CHANNELS;
    for row in 0..rows {
        let s = row * src_stride;
        let d = (y as usize + row) * dst_stride + offset;
        dst.pixels_mut()[d..d + row_bytes].copy_from_slice(&src.pixels()[s..s + row_bytes]);
    }
}

/// Clear pixels whose centres fall outside `outline`.
fn mask_outside(region: &mut RasterBuffer, outline: &[Point]) {
    let width = region.width() as usize;
    for (i, px) in region.pixels_mut().chunks_exact_mut(4).enumerate() {
        let center = Point::new((i % width) as f64 + 0.5, (i / width) as f64 + 0.5);
        if !contains_point(outline, center) {
            px.copy_from_slice(&[0, 0, 0, 0]);
        }
    }
}
