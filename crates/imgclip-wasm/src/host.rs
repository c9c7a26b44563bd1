//! Measurements of the page the widget runs in.

use imgclip_core::{HostEnvironment, Platform};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, Window};

/// Vendor-prefixed names of a 2D context's backing store ratio, most
/// specific first.
const BACKING_STORE_KEYS: [&str; 5] = [
    "webkitBackingStorePixelRatio",
    "mozBackingStorePixelRatio",
    "msBackingStorePixelRatio",
    "oBackingStorePixelRatio",
    "backingStorePixelRatio",
];

/// Read viewport, device ratio and user agent from `window`.
///
/// # Arguments
///
/// * `container` - CSS selector of the element to lay out in, if any
/// * `context` - A `CanvasRenderingContext2D` to read the backing store
///   ratio from, or `undefined`
///
/// # Errors
///
/// Fails outside a browser window, or when `container` matches no HTML
/// element.
pub(crate) fn read_host(container: Option<&str>, context: &JsValue) -> Result<HostEnvironment, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window available"))?;

    let container_width = match container {
        Some(selector) => container_width(&window, selector)?,
        None => 0.0,
    };
    let user_agent = window.navigator().user_agent().unwrap_or_default();

    Ok(HostEnvironment {
        viewport_width: window.inner_width()?.as_f64().unwrap_or(0.0),
        container_width,
        device_pixel_ratio: window.device_pixel_ratio(),
        backing_store_ratio: backing_store_ratio(context),
        platform: Platform::from_user_agent(&user_agent),
    })
}

fn container_width(window: &Window, selector: &str) -> Result<f64, JsValue> {
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document available"))?;
    let element = document
        .query_selector(selector)?
        .ok_or_else(|| JsValue::from_str(&format!("Container not found: {}", selector)))?;
    let element: HtmlElement = element
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("Container is not an HTML element: {}", selector)))?;
    Ok(element.offset_width() as f64)
}

fn backing_store_ratio(context: &JsValue) -> f64 {
    if !context.is_object() {
        return 1.0;
    }
    BACKING_STORE_KEYS
        .iter()
        .find_map(|key| {
            js_sys::Reflect::get(context, &JsValue::from_str(key))
                .ok()
                .and_then(|v| v.as_f64())
        })
        .unwrap_or(1.0)
}
