//! WASM-compatible wrapper types for image data.
//!
//! This module wraps the core `RasterBuffer` and handles the conversion of
//! JS option objects into core configuration structs.

use imgclip_core::RasterBuffer;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

/// An RGBA image held in WASM memory.
///
/// # Memory Management
///
/// `pixels()` copies the data into a JS `Uint8Array`. Keep images in WASM
/// memory between calls and copy out only what needs drawing.
///
/// `free()` releases the memory immediately; otherwise wasm-bindgen's
/// finalizer does it.
#[wasm_bindgen(js_name = RasterBuffer)]
pub struct JsRasterBuffer {
    inner: RasterBuffer,
}

#[wasm_bindgen(js_class = RasterBuffer)]
impl JsRasterBuffer {
    /// Wrap RGBA pixels, e.g. `ImageData.data`.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
    ///
    /// # Errors
    ///
    /// Returns an error if the pixel data length doesn't match width * height * 4.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsRasterBuffer, JsValue> {
        RasterBuffer::new(width, height, pixels)
            .map(Self::from_raster)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// A transparent image of the given size, e.g. a `scaleImageData` target.
    pub fn blank(width: u32, height: u32) -> JsRasterBuffer {
        Self::from_raster(RasterBuffer::blank(width, height))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Number of bytes in the pixel buffer (width * height * 4)
    #[wasm_bindgen(getter, js_name = byteLength)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels().len()
    }

    /// Returns RGBA pixel data as Uint8Array (a copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels().to_vec()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRasterBuffer {
    pub(crate) fn from_raster(inner: RasterBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn as_raster(&self) -> &RasterBuffer {
        &self.inner
    }

    pub(crate) fn as_raster_mut(&mut self) -> &mut RasterBuffer {
        &mut self.inner
    }

    pub(crate) fn into_raster(self) -> RasterBuffer {
        self.inner
    }
}

/// Read an options object; `undefined` and `null` give the defaults.
pub(crate) fn options_from_js<T>(value: JsValue, what: &str) -> Result<T, JsValue>
where
    T: DeserializeOwned + Default,
{
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", what, e)))
}

/// Serialize a core value into a plain JS object.
pub(crate) fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}
