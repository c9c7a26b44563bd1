//! Clip widget WASM bindings.
//!
//! The page owns the DOM: it forwards pointer events (canvas-relative CSS
//! pixels) to the widget and redraws from its read-only views.
//!
//! # Example
//!
//! ```typescript
//! const clip = new ImgClip(image, '#clip-container', { maxCssHeight: 400 });
//! canvas.style.width = `${clip.canvasLayout().cssWidth}px`;
//!
//! handle.onpointerdown = (e) => clip.pressHandle('horn-nw', x(e), y(e));
//! canvas.onpointermove = (e) => clip.pointerMove(x(e), y(e)) && redraw();
//! window.onpointerup = () => clip.pointerUp();
//!
//! const url = clip.clip();
//! clip.destroy();
//! ```

use crate::types::{options_from_js, to_js, JsRasterBuffer};
use imgclip_core::clip::{ClipOptions, ImgClip};
use imgclip_core::crop::Handle;
use imgclip_core::Point;
use wasm_bindgen::prelude::*;

/// Interactive crop/rotate/export widget.
#[wasm_bindgen(js_name = ImgClip)]
pub struct JsImgClip {
    inner: ImgClip,
}

#[wasm_bindgen(js_class = ImgClip)]
impl JsImgClip {
    /// Create the widget for `image` laid out inside `container`.
    ///
    /// # Arguments
    ///
    /// * `image` - The image to clip; ownership moves into the widget
    /// * `container` - CSS selector of the container element
    /// * `options` - Clip options object; missing keys keep their defaults
    /// * `context` - Optional 2D context to read the backing store ratio from
    ///
    /// # Errors
    ///
    /// Fails on invalid options, an empty image, or a container with no width.
    #[wasm_bindgen(constructor)]
    pub fn new(image: JsRasterBuffer, container: &str, options: JsValue, context: JsValue) -> Result<JsImgClip, JsValue> {
        let options: ClipOptions = options_from_js(options, "clip options")?;
        let host = crate::host::read_host(Some(container), &context)?;
        let inner = ImgClip::new(image.into_raster(), &host, options).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }

    /// Press on a rectangle handle (`"nw"`, `"horn-se"`, ...) or polygon point.
    #[wasm_bindgen(js_name = pressHandle)]
    pub fn press_handle(&mut self, handle: &str, x: f64, y: f64) -> Result<(), JsValue> {
        let handle = parse_handle(handle)?;
        self.inner.press_handle(handle, Point::new(x, y));
        Ok(())
    }

    /// Press on the canvas; returns the polygon point grabbed, if any.
    #[wasm_bindgen(js_name = pressCanvas)]
    pub fn press_canvas(&mut self, x: f64, y: f64) -> Option<String> {
        self.inner
            .press_canvas(Point::new(x, y))
            .map(|handle| handle.name().to_string())
    }

    /// Press on the body of the rectangle selection.
    #[wasm_bindgen(js_name = pressBody)]
    pub fn press_body(&mut self, x: f64, y: f64) {
        self.inner.press_body(Point::new(x, y));
    }

    /// Returns whether the selection changed and needs redrawing.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.inner.pointer_move(Point::new(x, y))
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) {
        self.inner.pointer_leave();
    }

    #[wasm_bindgen(js_name = cancelGesture)]
    pub fn cancel_gesture(&mut self) {
        self.inner.cancel_gesture();
    }

    /// Rotate a quarter turn; the selection resets to the whole canvas.
    pub fn rotate(&mut self, clockwise: bool) {
        self.inner.rotate(clockwise);
    }

    #[wasm_bindgen(js_name = resetSelection)]
    pub fn reset_selection(&mut self) {
        self.inner.reset_selection();
    }

    /// Re-layout after the container changed width.
    #[wasm_bindgen(js_name = resizeContainer)]
    pub fn resize_container(&mut self, width: f64) -> Result<(), JsValue> {
        self.inner
            .resize_container(width)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Export the selection as a data URL.
    pub fn clip(&mut self) -> Result<String, JsValue> {
        self.inner
            .clip()
            .map(str::to_string)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Last exported data URL, `undefined` before the first export.
    #[wasm_bindgen(getter, js_name = clipImgData)]
    pub fn clip_img_data(&self) -> Option<String> {
        self.inner.clip_img_data().map(str::to_string)
    }

    /// Current rotation in degrees (0, 90, 180 or 270).
    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> u32 {
        self.inner.rotation().degrees()
    }

    /// `{ cssWidth, cssHeight, marginLeft, backingWidth, backingHeight, scale }`
    #[wasm_bindgen(js_name = canvasLayout)]
    pub fn canvas_layout(&self) -> Result<JsValue, JsValue> {
        to_js(self.inner.canvas_layout())
    }

    /// Selection bounds `{ x, y, width, height }` in canvas CSS pixels.
    #[wasm_bindgen(js_name = cropRect)]
    pub fn crop_rect(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.crop_rect())
    }

    /// Polygon points `[{ x, y }, ...]` in drawing order, or `null`.
    #[wasm_bindgen(js_name = polygonOutline)]
    pub fn polygon_outline(&self) -> Result<JsValue, JsValue> {
        match self.inner.polygon_outline() {
            Some(points) => to_js(&points.to_vec()),
            None => Ok(JsValue::NULL),
        }
    }

    /// Export size text, `"W*H"`.
    #[wasm_bindgen(js_name = sizeTip)]
    pub fn size_tip(&self) -> String {
        self.inner.size_tip()
    }

    #[wasm_bindgen(js_name = isTipsVisible)]
    pub fn is_tips_visible(&self) -> bool {
        self.inner.is_tips_visible()
    }

    #[wasm_bindgen(js_name = isMagnifierVisible)]
    pub fn is_magnifier_visible(&self) -> bool {
        self.inner.is_magnifier_visible()
    }

    /// `{ source, dest, width, height }` of the magnifier capture.
    #[wasm_bindgen(js_name = magnifierFrame)]
    pub fn magnifier_frame(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.magnifier_frame())
    }

    /// Magnifier contents, ready for `putImageData`.
    #[wasm_bindgen(js_name = renderMagnifier)]
    pub fn render_magnifier(&self) -> JsRasterBuffer {
        JsRasterBuffer::from_raster(self.inner.render_magnifier())
    }

    /// Release the widget and its image.
    pub fn destroy(self) {
        self.inner.destroy();
    }
}

fn parse_handle(name: &str) -> Result<Handle, JsValue> {
    Handle::from_name(name).ok_or_else(|| JsValue::from_str(&format!("Unknown handle: {}", name)))
}
