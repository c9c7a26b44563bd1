//! Rectangular crop selection in display CSS pixels.

use super::{clamp_to, DragState, Handle};
use crate::transform::{Point, Rect};

/// Rectangle selection over a canvas of `bounds` CSS pixels.
///
/// Coordinates are relative to the canvas' top-left corner; any centering
/// margin of the canvas inside its container is the caller's concern.
#[derive(Debug, Clone, PartialEq)]
pub struct RectCrop {
    rect: Rect,
    bounds: (f64, f64),
    constrain: bool,
    min_move_diff: f64,
    drag: DragState,
    /// Rect and pointer at the start of the gesture
    snapshot: Rect,
    anchor: Point,
}

impl RectCrop {
    /// A selection covering the whole canvas.
    ///
    /// # Arguments
    ///
    /// * `canvas_width`, `canvas_height` - Canvas size in CSS pixels
    /// * `constrain` - Clamp the pointer to the canvas while resizing
    /// * `min_move_diff` - Pointer travel (per axis) needed to move the body
    pub fn new(canvas_width: f64, canvas_height: f64, constrain: bool, min_move_diff: f64) -> Self {
        let full = Rect::new(0.0, 0.0, canvas_width, canvas_height);
        Self {
            rect: full,
            bounds: (canvas_width, canvas_height),
            constrain,
            min_move_diff,
            drag: DragState::Idle,
            snapshot: full,
            anchor: Point::default(),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn bounds(&self) -> (f64, f64) {
        self.bounds
    }

    /// Replace the canvas size without touching the selection.
    pub fn set_bounds(&mut self, canvas_width: f64, canvas_height: f64) {
        self.bounds = (canvas_width, canvas_height);
    }

    /// Select the whole canvas and drop any gesture in progress.
    pub fn reset_to_full(&mut self) {
        self.rect = Rect::new(0.0, 0.0, self.bounds.0, self.bounds.1);
        self.drag = DragState::Idle;
    }

    /// Scale the selection after the canvas was resized.
    pub fn rescale(&mut self, scale_x: f64, scale_y: f64) {
        self.rect = Rect::new(
            self.rect.x * scale_x,
            self.rect.y * scale_y,
            self.rect.width * scale_x,
            self.rect.height * scale_y,
        );
        self.snapshot = self.rect;
    }

    /// Pointer position limited to the canvas when constrained.
    pub fn clamp_pointer(&self, pointer: Point) -> Point {
        if !self.constrain {
            return pointer;
        }
        Point::new(
            clamp_to(pointer.x, 0.0, self.bounds.0),
            clamp_to(pointer.y, 0.0, self.bounds.1),
        )
    }

    /// Start dragging `handle`. Ignored while the body is being moved.
    ///
    /// Returns whether the resize started.
    pub fn begin_resize(&mut self, handle: Handle, pointer: Point) -> bool {
        if self.drag == DragState::Moving {
            return false;
        }
        self.drag = DragState::Resizing(handle);
        self.snapshot = self.rect;
        self.anchor = pointer;
        true
    }

    /// Drag the active handle to `pointer`.
    ///
    /// Only the edges the handle owns follow the pointer; an edge dragged
    /// past its opposite edge stops there, leaving zero extent.
    ///
    /// Returns `false` when no resize is in progress.
    pub fn update_resize(&mut self, pointer: Point) -> bool {
        let DragState::Resizing(handle) = self.drag else {
            return false;
        };
        let cursor = self.clamp_pointer(pointer);
        let start = self.snapshot;

        let (left, right) = if handle.moves_left() {
            (cursor.x.min(start.right()), start.right())
        } else if handle.moves_right() {
            (start.x, cursor.x.max(start.x))
        } else {
            (start.x, start.right())
        };

        let (top, bottom) = if handle.moves_top() {
            (cursor.y.min(start.bottom()), start.bottom())
        } else if handle.moves_bottom() {
            (start.y, cursor.y.max(start.y))
        } else {
            (start.y, start.bottom())
        };

        self.rect = Rect::new(left, top, right - left, bottom - top);
        true
    }

    pub fn end_resize(&mut self) {
        if self.drag.is_resizing() {
            self.drag = DragState::Idle;
        }
    }

    /// Start dragging the body. Ignored while a handle is being dragged.
    pub fn begin_move(&mut self, pointer: Point) {
        if self.drag.is_resizing() {
            return;
        }
        self.drag = DragState::Moving;
        self.snapshot = self.rect;
        self.anchor = pointer;
    }

    /// Translate by the pointer travel since the last accepted position.
    ///
    /// Travel of at most `min_move_diff` on both axes is ignored and keeps
    /// accumulating. The rectangle never leaves the canvas.
    pub fn update_move(&mut self, pointer: Point) -> bool {
        if self.drag != DragState::Moving {
            return false;
        }

        let dx = pointer.x - self.anchor.x;
        let dy = pointer.y - self.anchor.y;
        if dx.abs() <= self.min_move_diff && dy.abs() <= self.min_move_diff {
            return false;
        }
        self.anchor = pointer;

        let max_x = self.bounds.0 - self.rect.width;
        let max_y = self.bounds.1 - self.rect.height;
        self.rect.x = clamp_to(self.rect.x + dx, 0.0, max_x);
        self.rect.y = clamp_to(self.rect.y + dy, 0.0, max_y);
        true
    }

    pub fn end_move(&mut self) {
        if self.drag == DragState::Moving {
            self.drag = DragState::Idle;
        }
    }

    /// Abandon the gesture and restore the selection it started from.
    pub fn cancel(&mut self) {
        if !self.drag.is_idle() {
            self.rect = self.snapshot;
            self.drag = DragState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crop() -> RectCrop {
        RectCrop::new(300.0, 200.0, true, 1.0)
    }

    #[test]
    fn test_starts_full() {
        let c = crop();
        assert_eq!(c.rect(), Rect::new(0.0, 0.0, 300.0, 200.0));
        assert_eq!(c.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_resize_table() {
        // Start from a centred rect and drag each handle by (+10, +20)
        let base = Rect::new(100.0, 50.0, 100.0, 100.0);
        let cases = [
            (Handle::Nw, Rect::new(110.0, 70.0, 90.0, 80.0)),
            (Handle::Ne, Rect::new(100.0, 70.0, 110.0, 80.0)),
            (Handle::Sw, Rect::new(110.0, 50.0, 90.0, 120.0)),
            (Handle::Se, Rect::new(100.0, 50.0, 110.0, 120.0)),
            (Handle::N, Rect::new(100.0, 70.0, 100.0, 80.0)),
            (Handle::S, Rect::new(100.0, 50.0, 100.0, 120.0)),
            (Handle::W, Rect::new(110.0, 50.0, 90.0, 100.0)),
            (Handle::E, Rect::new(100.0, 50.0, 110.0, 100.0)),
        ];

        for (handle, expected) in cases {
            let mut c = crop();
            c.rect = base;
            let grip = Point::new(
                if handle.moves_right() { base.right() } else { base.x },
                if handle.moves_bottom() { base.bottom() } else { base.y },
            );
            c.begin_resize(handle, grip);
            assert!(c.update_resize(Point::new(grip.x + 10.0, grip.y + 20.0)));
            assert_eq!(c.rect(), expected, "handle {:?}", handle);
        }
    }

    #[test]
    fn test_se_beyond_canvas_is_clamped() {
        let mut c = crop();
        c.rect = Rect::new(50.0, 40.0, 100.0, 100.0);
        c.begin_resize(Handle::Se, Point::new(150.0, 140.0));
        c.update_resize(Point::new(900.0, 700.0));
        assert_eq!(c.rect(), Rect::new(50.0, 40.0, 250.0, 160.0));
    }

    #[test]
    fn test_crossing_handles_collapse_to_zero() {
        let mut c = crop();
        c.rect = Rect::new(50.0, 40.0, 100.0, 100.0);

        c.begin_resize(Handle::Se, Point::new(150.0, 140.0));
        c.update_resize(Point::new(10.0, 5.0));
        assert_eq!(c.rect(), Rect::new(50.0, 40.0, 0.0, 0.0));
        c.end_resize();

        c.rect = Rect::new(50.0, 40.0, 100.0, 100.0);
        c.begin_resize(Handle::Nw, Point::new(50.0, 40.0));
        c.update_resize(Point::new(280.0, 190.0));
        assert_eq!(c.rect(), Rect::new(150.0, 140.0, 0.0, 0.0));
    }

    #[test]
    fn test_unconstrained_pointer_not_clamped() {
        let mut c = RectCrop::new(300.0, 200.0, false, 1.0);
        c.begin_resize(Handle::E, Point::new(300.0, 100.0));
        c.update_resize(Point::new(400.0, 100.0));
        assert_eq!(c.rect().width, 400.0);
    }

    #[test]
    fn test_move_threshold() {
        let mut c = crop();
        c.rect = Rect::new(10.0, 10.0, 50.0, 50.0);
        c.begin_move(Point::new(100.0, 100.0));

        // Below threshold: nothing moves
        assert!(!c.update_move(Point::new(101.0, 100.5)));
        assert_eq!(c.rect().x, 10.0);

        // Travel accumulates from the last accepted position
        assert!(c.update_move(Point::new(103.0, 100.0)));
        assert_eq!(c.rect(), Rect::new(13.0, 10.0, 50.0, 50.0));

        assert!(c.update_move(Point::new(103.0, 110.0)));
        assert_eq!(c.rect(), Rect::new(13.0, 20.0, 50.0, 50.0));
    }

    #[test]
    fn test_move_clamped_to_canvas() {
        let mut c = crop();
        c.rect = Rect::new(10.0, 10.0, 50.0, 50.0);
        c.begin_move(Point::new(0.0, 0.0));
        c.update_move(Point::new(1000.0, 1000.0));
        assert_eq!(c.rect(), Rect::new(250.0, 150.0, 50.0, 50.0));

        c.update_move(Point::new(-1000.0, -1000.0));
        assert_eq!(c.rect(), Rect::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn test_gestures_are_exclusive() {
        let mut c = crop();
        c.begin_resize(Handle::Se, Point::new(300.0, 200.0));
        c.begin_move(Point::new(10.0, 10.0));
        assert_eq!(c.drag_state(), DragState::Resizing(Handle::Se));
        assert!(!c.update_move(Point::new(50.0, 50.0)));

        c.end_move();
        assert!(c.drag_state().is_resizing());
        c.end_resize();
        assert!(c.drag_state().is_idle());
        assert!(!c.update_resize(Point::new(1.0, 1.0)));
    }

    #[test]
    fn test_resize_ignored_while_moving() {
        let mut c = crop();
        c.begin_resize(Handle::Se, Point::new(300.0, 200.0));
        c.update_resize(Point::new(100.0, 100.0));
        c.end_resize();

        c.begin_move(Point::new(50.0, 50.0));
        assert!(c.update_move(Point::new(60.0, 50.0)));
        assert!(!c.begin_resize(Handle::Se, Point::new(110.0, 100.0)));
        assert_eq!(c.drag_state(), DragState::Moving);
        assert!(!c.update_resize(Point::new(200.0, 200.0)));

        // The move snapshot survives, so cancelling undoes the whole move
        c.cancel();
        assert_eq!(c.rect(), Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_cancel_restores_snapshot() {
        let mut c = crop();
        c.begin_resize(Handle::Nw, Point::new(0.0, 0.0));
        c.update_resize(Point::new(100.0, 100.0));
        c.cancel();
        assert_eq!(c.rect(), Rect::new(0.0, 0.0, 300.0, 200.0));
        assert!(c.drag_state().is_idle());
    }

    #[test]
    fn test_rescale() {
        let mut c = crop();
        c.rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        c.set_bounds(600.0, 400.0);
        c.rescale(2.0, 2.0);
        assert_eq!(c.rect(), Rect::new(20.0, 40.0, 60.0, 80.0));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
