//! imgclip WASM - WebAssembly bindings for imgclip
//!
//! This crate exposes the imgclip-core scaling, compression and clip widget
//! to JavaScript/TypeScript. Host measurements (viewport, container width,
//! device pixel ratio, user agent) are read through `web-sys`.
//!
//! # Module Structure
//!
//! - `types` - `RasterBuffer` wrapper and option conversion
//! - `scale` - `scaleImageData`, `scaleImage`, `resize`
//! - `compress` - `compressImage`
//! - `clip` - The `ImgClip` widget class
//! - `host` - Page measurements
//! - `logger` - Console backend for the `log` facade
//!
//! # Usage
//!
//! ```typescript
//! import init, { RasterBuffer, ImgClip } from '@imgclip/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const data = ctx.getImageData(0, 0, img.width, img.height);
//! const image = new RasterBuffer(data.width, data.height, data.data);
//! const clip = new ImgClip(image, '#container', { sizeTipsStyle: 1 });
//! ```

use wasm_bindgen::prelude::*;

mod clip;
mod compress;
mod host;
mod logger;
mod scale;
mod types;

// Re-export public types
pub use clip::JsImgClip;
pub use compress::compress_image;
pub use logger::set_log_level;
pub use scale::{resize, scale_image, scale_image_data};
pub use types::JsRasterBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    logger::install(log::LevelFilter::Info);
    log::debug!("imgclip {} ready", version());
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
