//! Interactive crop selection.
//!
//! Two selection shapes share the same handle vocabulary:
//!
//! - [`RectCrop`]: an axis-aligned rectangle in display CSS pixels, resized by
//!   its eight handles and moved by dragging its body
//! - [`PolygonCrop`]: eight free points in canvas backing pixels, each dragged
//!   independently
//!
//! Both run the drag state machine `Idle → Resizing(handle) → Idle`; the
//! rectangle additionally has `Idle → Moving → Idle`. Gestures never fail.

mod polygon;
mod rect;

pub use polygon::{contains_point, PolygonCrop};
pub use rect::RectCrop;

use serde::{Deserialize, Serialize};

/// One of the eight control points of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Nw,
    Ne,
    Sw,
    Se,
    N,
    S,
    W,
    E,
}

impl Handle {
    /// All handles in storage order.
    pub const ALL: [Handle; 8] = [
        Handle::Nw,
        Handle::Ne,
        Handle::Sw,
        Handle::Se,
        Handle::N,
        Handle::S,
        Handle::W,
        Handle::E,
    ];

    /// Order in which a press is tested against polygon points.
    pub const HIT_ORDER: [Handle; 8] = [
        Handle::Nw,
        Handle::N,
        Handle::Ne,
        Handle::W,
        Handle::E,
        Handle::Sw,
        Handle::S,
        Handle::Se,
    ];

    /// Clockwise outline starting at the top-left corner.
    pub const OUTLINE_ORDER: [Handle; 8] = [
        Handle::Nw,
        Handle::N,
        Handle::Ne,
        Handle::E,
        Handle::Se,
        Handle::S,
        Handle::Sw,
        Handle::W,
    ];

    /// Parse a handle name, with or without the `horn-` class prefix.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        let name = name.strip_prefix("horn-").unwrap_or(name);
        match name.to_ascii_lowercase().as_str() {
            "nw" => Some(Handle::Nw),
            "ne" => Some(Handle::Ne),
            "sw" => Some(Handle::Sw),
            "se" => Some(Handle::Se),
            "n" => Some(Handle::N),
            "s" => Some(Handle::S),
            "w" => Some(Handle::W),
            "e" => Some(Handle::E),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Handle::Nw => "nw",
            Handle::Ne => "ne",
            Handle::Sw => "sw",
            Handle::Se => "se",
            Handle::N => "n",
            Handle::S => "s",
            Handle::W => "w",
            Handle::E => "e",
        }
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self as usize
    }

    /// Whether dragging this handle moves the left edge.
    pub fn moves_left(self) -> bool {
        matches!(self, Handle::Nw | Handle::Sw | Handle::W)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, Handle::Ne | Handle::Se | Handle::E)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, Handle::Nw | Handle::Ne | Handle::N)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, Handle::Sw | Handle::Se | Handle::S)
    }
}

/// Active gesture of a crop selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Resizing(Handle),
    Moving,
}

impl DragState {
    pub fn is_idle(self) -> bool {
        self == DragState::Idle
    }

    pub fn is_resizing(self) -> bool {
        matches!(self, DragState::Resizing(_))
    }
}

/// `value` limited to `[lo, hi]`; `lo` wins when the range is empty.
#[inline]
pub(crate) fn clamp_to(value: f64, lo: f64, hi: f64) -> f64 {
    value.min(hi).max(lo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_names() {
        for handle in Handle::ALL {
            assert_eq!(Handle::from_name(handle.name()), Some(handle));
        }
        assert_eq!(Handle::from_name("horn-se"), Some(Handle::Se));
        assert_eq!(Handle::from_name("NW"), Some(Handle::Nw));
        assert_eq!(Handle::from_name("middle"), None);
    }

    #[test]
    fn test_handle_edges() {
        // Each handle moves one or two edges, never opposite ones
        for handle in Handle::ALL {
            assert!(!(handle.moves_left() && handle.moves_right()));
            assert!(!(handle.moves_top() && handle.moves_bottom()));
            let edges = [
                handle.moves_left(),
                handle.moves_right(),
                handle.moves_top(),
                handle.moves_bottom(),
            ];
            let count = edges.iter().filter(|&&e| e).count();
            assert!(count == 1 || count == 2);
        }
    }

    #[test]
    fn test_index_matches_storage_order() {
        for (i, handle) in Handle::ALL.iter().enumerate() {
            assert_eq!(handle.index(), i);
        }
    }

    #[test]
    fn test_clamp_to_empty_range() {
        assert_eq!(clamp_to(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp_to(-5.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp_to(15.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp_to(5.0, 0.0, -3.0), 0.0);
    }
}
