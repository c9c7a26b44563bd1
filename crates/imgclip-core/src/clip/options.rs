//! Clip widget configuration.

use super::ClipError;
use crate::encode::OutputMime;
use crate::size::SizeLimits;
use serde::{Deserialize, Serialize};

/// When the size tip next to the selection is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum TipsStyle {
    /// Only while a handle is dragged (`0`)
    #[default]
    WhileDragging,
    /// Always (`1`)
    Always,
    /// Never (`-1`)
    Never,
}

impl From<i32> for TipsStyle {
    fn from(value: i32) -> Self {
        match value {
            1 => TipsStyle::Always,
            -1 => TipsStyle::Never,
            _ => TipsStyle::WhileDragging,
        }
    }
}

impl From<TipsStyle> for i32 {
    fn from(value: TipsStyle) -> Self {
        match value {
            TipsStyle::WhileDragging => 0,
            TipsStyle::Always => 1,
            TipsStyle::Never => -1,
        }
    }
}

/// Selection shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipShape {
    #[default]
    #[serde(alias = "rect")]
    Rectangle,
    Polygon,
}

/// Options for [`super::ImgClip`]. Missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClipOptions {
    /// Encoder quality, 0.0 to 1.0
    pub quality: f64,
    pub mime: OutputMime,
    /// Bilinear resampling on export; nearest neighbor when off
    pub is_smooth: bool,
    /// Half-size of the magnified square, in backing pixels
    pub capture_radius: f64,
    /// Pointer travel ignored when dragging the selection body
    pub min_move_diff: f64,
    /// Cap on the displayed canvas height in CSS pixels, 0 for none
    pub max_css_height: f64,
    pub size_tips_style: TipsStyle,
    pub compress_scale_ratio: f64,
    pub iphone_fixed_ratio: f64,
    #[serde(flatten)]
    pub limits: SizeLimits,
    /// Keep handles inside the canvas
    pub is_constrain: bool,
    /// Drawn radius of polygon points
    pub choose_point_radius: f64,
    pub shape: ClipShape,
}

impl Default for ClipOptions {
    fn default() -> Self {
        Self {
            quality: 0.92,
            mime: OutputMime::Jpeg,
            is_smooth: true,
            capture_radius: 30.0,
            min_move_diff: 1.0,
            max_css_height: 0.0,
            size_tips_style: TipsStyle::default(),
            compress_scale_ratio: 1.0,
            iphone_fixed_ratio: 2.0,
            limits: SizeLimits::default(),
            is_constrain: true,
            choose_point_radius: 10.0,
            shape: ClipShape::default(),
        }
    }
}

impl ClipOptions {
    /// Reject values no layout can be computed from.
    pub fn validate(&self) -> Result<(), ClipError> {
        if !self.quality.is_finite() || !(0.0..=1.0).contains(&self.quality) {
            return Err(invalid("quality", "must be between 0 and 1"));
        }
        if !self.capture_radius.is_finite() || self.capture_radius <= 0.0 {
            return Err(invalid("captureRadius", "must be positive"));
        }
        let non_negative = [
            ("minMoveDiff", self.min_move_diff),
            ("maxCssHeight", self.max_css_height),
            ("compressScaleRatio", self.compress_scale_ratio),
            ("iphoneFixedRatio", self.iphone_fixed_ratio),
            ("maxWidth", self.limits.max_width),
            ("forceWidth", self.limits.force_width),
            ("forceHeight", self.limits.force_height),
            ("choosePointRadius", self.choose_point_radius),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(invalid(name, "must be a non-negative number"));
            }
        }
        Ok(())
    }
}

fn invalid(name: &'static str, reason: &'static str) -> ClipError {
    ClipError::InvalidOption { name, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ClipOptions::default();
        assert_eq!(options.quality, 0.92);
        assert_eq!(options.mime, OutputMime::Jpeg);
        assert_eq!(options.capture_radius, 30.0);
        assert_eq!(options.iphone_fixed_ratio, 2.0);
        assert_eq!(options.size_tips_style, TipsStyle::WhileDragging);
        assert_eq!(options.shape, ClipShape::Rectangle);
        assert!(options.is_constrain);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_tips_style_mapping() {
        assert_eq!(TipsStyle::from(0), TipsStyle::WhileDragging);
        assert_eq!(TipsStyle::from(1), TipsStyle::Always);
        assert_eq!(TipsStyle::from(-1), TipsStyle::Never);
        assert_eq!(TipsStyle::from(7), TipsStyle::WhileDragging);
        assert_eq!(i32::from(TipsStyle::Never), -1);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let options = ClipOptions {
            quality: 1.5,
            ..Default::default()
        };
        assert!(matches!(
            options.validate(),
            Err(ClipError::InvalidOption { name: "quality", .. })
        ));

        let options = ClipOptions {
            capture_radius: 0.0,
            ..Default::default()
        };
        assert!(options.validate().is_err());

        let mut options = ClipOptions::default();
        options.limits.max_width = -1.0;
        assert!(matches!(
            options.validate(),
            Err(ClipError::InvalidOption { name: "maxWidth", .. })
        ));
    }
}
