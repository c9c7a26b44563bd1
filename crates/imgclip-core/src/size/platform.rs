//! Host platform and display measurements.

use serde::{Deserialize, Serialize};

/// Operating system flags derived from a user-agent string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Platform {
    pub is_ios: bool,
    pub is_iphone: bool,
    pub is_ipad: bool,
    pub is_android: bool,
}

impl Platform {
    /// Detect the platform from a user-agent string.
    pub fn from_user_agent(ua: &str) -> Self {
        let is_iphone = ua.contains("iPhone OS");
        let is_ipad = ua.contains("iPad");
        Self {
            is_ios: is_iphone || is_ipad,
            is_iphone,
            is_ipad,
            is_android: ua.contains("Android"),
        }
    }

    /// Whether exports get the iPhone resolution boost.
    pub fn is_ios_iphone(&self) -> bool {
        self.is_ios && self.is_iphone
    }
}

/// Measurements the page would otherwise read from the DOM.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HostEnvironment {
    /// `window.innerWidth` in CSS pixels
    pub viewport_width: f64,
    /// Container `offsetWidth` in CSS pixels, 0 when unknown
    pub container_width: f64,
    /// `window.devicePixelRatio`
    pub device_pixel_ratio: f64,
    /// Canvas backing store ratio, 1 on every current browser
    pub backing_store_ratio: f64,
    pub platform: Platform,
}

impl Default for HostEnvironment {
    fn default() -> Self {
        Self {
            viewport_width: 0.0,
            container_width: 0.0,
            device_pixel_ratio: 1.0,
            backing_store_ratio: 1.0,
            platform: Platform::default(),
        }
    }
}

impl HostEnvironment {
    /// Width available for the clip canvas: the container, else the viewport.
    pub fn layout_width(&self) -> f64 {
        if positive(self.container_width) {
            self.container_width
        } else {
            self.viewport_width
        }
    }

    /// `devicePixelRatio / backingStorePixelRatio`, missing values read as 1.
    pub fn device_ratio(&self) -> f64 {
        or_one(self.device_pixel_ratio) / or_one(self.backing_store_ratio)
    }

    /// Effective pixel ratio for drawing and export.
    ///
    /// # Arguments
    ///
    /// * `scale_ratio` - `compressScaleRatio`, 0 reads as 1
    /// * `iphone_ratio` - `iphoneFixedRatio`, applied only on iPhone iOS
    pub fn pixel_ratio(&self, scale_ratio: f64, iphone_ratio: f64) -> f64 {
        let mut ratio = self.device_ratio() * or_one(scale_ratio);
        if self.platform.is_ios_iphone() {
            ratio *= or_one(iphone_ratio);
        }
        ratio
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}

fn or_one(value: f64) -> f64 {
    if positive(value) {
        value
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 16_5 like Mac OS X) AppleWebKit/605.1.15";
    const IPAD_UA: &str = "Mozilla/5.0 (iPad; CPU OS 15_0 like Mac OS X) AppleWebKit/605.1.15";
    const ANDROID_UA: &str = "Mozilla/5.0 (Linux; Android 13; Pixel 7) Chrome/116.0 Mobile";
    const DESKTOP_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) Firefox/118.0";

    #[test]
    fn test_platform_detection() {
        let iphone = Platform::from_user_agent(IPHONE_UA);
        assert!(iphone.is_ios && iphone.is_iphone && !iphone.is_ipad);

        let ipad = Platform::from_user_agent(IPAD_UA);
        assert!(ipad.is_ios && ipad.is_ipad && !ipad.is_iphone);
        assert!(!ipad.is_ios_iphone());

        let android = Platform::from_user_agent(ANDROID_UA);
        assert!(android.is_android && !android.is_ios);

        assert_eq!(Platform::from_user_agent(DESKTOP_UA), Platform::default());
    }

    #[test]
    fn test_pixel_ratio_defaults() {
        let host = HostEnvironment {
            device_pixel_ratio: 0.0,
            backing_store_ratio: f64::NAN,
            ..Default::default()
        };
        assert_eq!(host.device_ratio(), 1.0);
        assert_eq!(host.pixel_ratio(0.0, 2.0), 1.0);
    }

    #[test]
    fn test_pixel_ratio_iphone_boost() {
        let host = HostEnvironment {
            device_pixel_ratio: 3.0,
            platform: Platform::from_user_agent(IPHONE_UA),
            ..Default::default()
        };
        assert_eq!(host.pixel_ratio(1.0, 2.0), 6.0);
        assert_eq!(host.pixel_ratio(0.5, 1.5), 2.25);

        let desktop = HostEnvironment {
            device_pixel_ratio: 2.0,
            backing_store_ratio: 2.0,
            ..Default::default()
        };
        assert_eq!(desktop.pixel_ratio(3.0, 2.0), 3.0);
    }

    #[test]
    fn test_layout_width_falls_back_to_viewport() {
        let mut host = HostEnvironment {
            viewport_width: 375.0,
            ..Default::default()
        };
        assert_eq!(host.layout_width(), 375.0);
        host.container_width = 300.0;
        assert_eq!(host.layout_width(), 300.0);
    }
}
