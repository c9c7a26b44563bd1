//! Scaling WASM bindings.
//!
//! # Functions
//!
//! - [`scale_image_data`] - Resample one image into another's size
//! - [`scale_image`] - Resample and encode as a data URL
//! - [`resize`] - Resample into a new image
//!
//! # Example
//!
//! ```typescript
//! import { RasterBuffer, scaleImage, scaleImageData } from '@imgclip/wasm';
//!
//! const src = new RasterBuffer(img.width, img.height, imageData.data);
//! const dst = RasterBuffer.blank(200, 150);
//! scaleImageData(src, dst, { processType: 2 });
//!
//! const url = scaleImage(src, { width: 80, height: 80, mime: 'image/png', processType: 1 });
//! ```

use crate::types::{options_from_js, JsRasterBuffer};
use imgclip_core::scale::{self, ScaleAlgorithm, ScaleConfig};
use wasm_bindgen::prelude::*;

/// Resample `src` into `dst`, filling all of `dst`.
///
/// # Arguments
///
/// * `options` - `{ processType }`: 0 nearest, 1 bilinear, 2 bicubic
///   matrix, 3 bicubic separable; anything else is bilinear. The output
///   size is taken from `dst`
#[wasm_bindgen(js_name = scaleImageData)]
pub fn scale_image_data(src: &JsRasterBuffer, dst: &mut JsRasterBuffer, options: JsValue) -> Result<(), JsValue> {
    let config: ScaleConfig = options_from_js(options, "scale options")?;
    scale::scale_image_data(src.as_raster(), dst.as_raster_mut(), config.algorithm);
    Ok(())
}

/// Resample `image` and encode it as a data URL at quality 0.9.
///
/// # Arguments
///
/// * `config` - `{ width, height, mime, processType }`; missing keys default
///   to 80, 80, `image/png` and bilinear
#[wasm_bindgen(js_name = scaleImage)]
pub fn scale_image(image: &JsRasterBuffer, config: JsValue) -> Result<String, JsValue> {
    let config: ScaleConfig = options_from_js(config, "scale config")?;
    scale::scale_image(image.as_raster(), &config).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resample `image` into a new `width × height` image.
#[wasm_bindgen]
pub fn resize(image: &JsRasterBuffer, width: u32, height: u32, process_type: i32) -> Result<JsRasterBuffer, JsValue> {
    let algorithm = ScaleAlgorithm::from_process_type(process_type);
    scale::resize(image.as_raster(), width, height, algorithm)
        .map(JsRasterBuffer::from_raster)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use imgclip_core::RasterBuffer;

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    #[test]
    fn test_resize_ok() {
        let src = JsRasterBuffer::from_raster(RasterBuffer::filled(8, 8, RED));
        let Ok(out) = resize(&src, 3, 5, 1) else {
            panic!("resize failed");
        };
        assert_eq!((out.width(), out.height()), (3, 5));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use imgclip_core::RasterBuffer;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const RED: [u8; 4] = [255, 0, 0, 255];
    const BLUE: [u8; 4] = [0, 0, 255, 255];

    #[wasm_bindgen_test]
    fn test_scale_image_defaults_to_png() {
        let src = JsRasterBuffer::from_raster(RasterBuffer::filled(16, 16, [10, 20, 30, 255]));
        let url = scale_image(&src, JsValue::UNDEFINED).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
    }

    fn quadrants() -> JsRasterBuffer {
        let mut src = RasterBuffer::filled(4, 4, RED);
        for y in 2..4 {
            for x in 2..4 {
                src.put_pixel(x, y, BLUE);
            }
        }
        JsRasterBuffer::from_raster(src)
    }

    #[wasm_bindgen_test]
    fn test_scale_image_data_takes_options_object() {
        let options = js_sys::Object::new();
        js_sys::Reflect::set(&options, &"processType".into(), &0.into()).unwrap();
        let mut dst = JsRasterBuffer::blank(2, 2);

        scale_image_data(&quadrants(), &mut dst, options.into()).unwrap();

        let out = dst.into_raster();
        assert_eq!(out.pixel_clamped(0, 0), RED);
        assert_eq!(out.pixel_clamped(1, 1), BLUE);
    }

    #[wasm_bindgen_test]
    fn test_scale_image_data_defaults_without_options() {
        let mut dst = JsRasterBuffer::blank(3, 3);
        assert!(scale_image_data(&quadrants(), &mut dst, JsValue::UNDEFINED).is_ok());
        assert_eq!(dst.into_raster().pixel_clamped(0, 0), RED);
    }

    #[wasm_bindgen_test]
    fn test_scale_image_data_rejects_bad_options() {
        let mut dst = JsRasterBuffer::blank(2, 2);
        assert!(scale_image_data(&quadrants(), &mut dst, JsValue::from_str("fast")).is_err());
    }

    #[wasm_bindgen_test]
    fn test_resize_zero_rejected() {
        let src = JsRasterBuffer::from_raster(RasterBuffer::filled(4, 4, [0, 0, 0, 255]));
        assert!(resize(&src, 0, 4, 0).is_err());
    }
}
