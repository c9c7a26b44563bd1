//! Compression WASM binding.

use crate::host::read_host;
use crate::types::{options_from_js, JsRasterBuffer};
use imgclip_core::compress::{self, CompressConfig};
use wasm_bindgen::prelude::*;

/// Downscale `image` for the current screen and encode it as a data URL.
///
/// # Arguments
///
/// * `image` - Source image
/// * `config` - `{ quality, mime, compressScaleRatio, iphoneFixedRatio,
///   isUseOriginSize, maxWidth, forceWidth, forceHeight, smooth }`; missing
///   keys keep their defaults
/// * `context` - Optional 2D context to read the backing store ratio from
///
/// # Example
///
/// ```typescript
/// const url = compressImage(image, { quality: 0.8, maxWidth: 1024 });
/// ```
#[wasm_bindgen(js_name = compressImage)]
pub fn compress_image(image: &JsRasterBuffer, config: JsValue, context: JsValue) -> Result<String, JsValue> {
    let config: CompressConfig = options_from_js(config, "compress config")?;
    let host = read_host(None, &context)?;
    compress::compress_image(image.as_raster(), &config, &host).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use imgclip_core::RasterBuffer;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_compress_defaults_to_jpeg() {
        let image = JsRasterBuffer::from_raster(RasterBuffer::filled(64, 48, [200, 100, 50, 255]));
        let url = compress_image(&image, JsValue::UNDEFINED, JsValue::UNDEFINED).unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
    }

    #[wasm_bindgen_test]
    fn test_compress_empty_image_rejected() {
        let image = JsRasterBuffer::blank(0, 0);
        assert!(compress_image(&image, JsValue::UNDEFINED, JsValue::UNDEFINED).is_err());
    }
}
