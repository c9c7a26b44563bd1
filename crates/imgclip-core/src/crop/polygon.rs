//! Eight-point polygon selection in canvas backing pixels.

use super::{clamp_to, Handle};
use crate::transform::{Point, Rect};

/// Polygon selection whose eight points start on the canvas border (corners
/// and edge midpoints) and can each be dragged anywhere on the canvas.
///
/// Points are free: dragging one past its neighbours produces a
/// self-intersecting outline, which [`PolygonCrop::contains`] resolves with
/// the non-zero winding rule.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonCrop {
    points: [Point; 8],
    snapshot: [Point; 8],
    bounds: (f64, f64),
    constrain: bool,
    hit_radius: f64,
    active: Option<Handle>,
}

impl PolygonCrop {
    /// A polygon tracing the border of a `canvas_width × canvas_height` canvas.
    ///
    /// `point_radius` is the drawn radius of a point; presses within three
    /// times that distance grab it.
    pub fn new(canvas_width: f64, canvas_height: f64, constrain: bool, point_radius: f64) -> Self {
        let mut crop = Self {
            points: [Point::default(); 8],
            snapshot: [Point::default(); 8],
            bounds: (canvas_width, canvas_height),
            constrain,
            hit_radius: point_radius * 3.0,
            active: None,
        };
        crop.reset_to_full();
        crop
    }

    pub fn point(&self, handle: Handle) -> Point {
        self.points[handle.index()]
    }

    pub fn active_handle(&self) -> Option<Handle> {
        self.active
    }

    pub fn bounds(&self) -> (f64, f64) {
        self.bounds
    }

    pub fn set_bounds(&mut self, canvas_width: f64, canvas_height: f64) {
        self.bounds = (canvas_width, canvas_height);
    }

    /// Put the points back on the canvas border and drop any drag.
    pub fn reset_to_full(&mut self) {
        let (w, h) = self.bounds;
        let (half_w, half_h) = (w / 2.0, h / 2.0);
        for handle in Handle::ALL {
            self.points[handle.index()] = match handle {
                Handle::Nw => Point::new(0.0, 0.0),
                Handle::N => Point::new(half_w, 0.0),
                Handle::Ne => Point::new(w, 0.0),
                Handle::W => Point::new(0.0, half_h),
                Handle::E => Point::new(w, half_h),
                Handle::Sw => Point::new(0.0, h),
                Handle::S => Point::new(half_w, h),
                Handle::Se => Point::new(w, h),
            };
        }
        self.snapshot = self.points;
        self.active = None;
    }

    /// Scale every point after the canvas was resized.
    pub fn rescale(&mut self, scale_x: f64, scale_y: f64) {
        for p in &mut self.points {
            p.x *= scale_x;
            p.y *= scale_y;
        }
        self.snapshot = self.points;
    }

    /// First handle whose point lies within the grab radius of `point`
    /// (square test), checked in [`Handle::HIT_ORDER`].
    pub fn hit_test(&self, point: Point) -> Option<Handle> {
        Handle::HIT_ORDER.into_iter().find(|&handle| {
            let p = self.point(handle);
            (point.x - p.x).abs() <= self.hit_radius && (point.y - p.y).abs() <= self.hit_radius
        })
    }

    /// Start dragging `handle`.
    pub fn begin_resize(&mut self, handle: Handle) {
        self.snapshot = self.points;
        self.active = Some(handle);
    }

    /// Hit-test `point` and start dragging the handle found there.
    pub fn press(&mut self, point: Point) -> Option<Handle> {
        let handle = self.hit_test(point)?;
        self.begin_resize(handle);
        Some(handle)
    }

    /// Move the dragged point to `pointer`, clamped to the canvas when constrained.
    pub fn update_resize(&mut self, pointer: Point) -> bool {
        let Some(handle) = self.active else {
            return false;
        };
        self.points[handle.index()] = self.clamp_pointer(pointer);
        true
    }

    pub fn end_resize(&mut self) {
        self.active = None;
    }

    pub fn cancel(&mut self) {
        if self.active.take().is_some() {
            self.points = self.snapshot;
        }
    }

    pub fn clamp_pointer(&self, pointer: Point) -> Point {
        if !self.constrain {
            return pointer;
        }
        Point::new(
            clamp_to(pointer.x, 0.0, self.bounds.0),
            clamp_to(pointer.y, 0.0, self.bounds.1),
        )
    }

    /// Points in drawing order.
    pub fn outline(&self) -> [Point; 8] {
        Handle::OUTLINE_ORDER.map(|handle| self.point(handle))
    }

    /// Bounding box of all points.
    pub fn bounding_rect(&self) -> Rect {
        Rect::bounding(&self.points)
    }

    /// Whether `point` is inside the outline (non-zero winding rule).
    pub fn contains(&self, point: Point) -> bool {
        contains_point(&self.outline(), point)
    }
}

/// Whether `point` is inside the closed `polygon` (non-zero winding rule).
pub fn contains_point(polygon: &[Point], point: Point) -> bool {
    winding_number(polygon, point) != 0
}

/// Winding number of a closed polygon around `point`.
fn winding_number(polygon: &[Point], point: Point) -> i32 {
    let mut winding = 0;
    let n = polygon.len();
    for i in 0..n {
        let a = polygon[i];
        let b = polygon[(i + 1) % n];
        // > 0 when point is left of a→b
        let side = (b.x - a.x) * (point.y - a.y) - (point.x - a.x) * (b.y - a.y);
        if a.y <= point.y {
            if b.y > point.y && side > 0.0 {
                winding += 1;
            }
        } else if b.y <= point.y && side < 0.0 {
            winding -= 1;
        }
    }
    winding
}

#[cfg(test)]
mod tests {
    use super::*;

    fn crop() -> PolygonCrop {
        PolygonCrop::new(400.0, 200.0, true, 10.0)
    }

    #[test]
    fn test_initial_points_on_border() {
        let c = crop();
        assert_eq!(c.point(Handle::Nw), Point::new(0.0, 0.0));
        assert_eq!(c.point(Handle::N), Point::new(200.0, 0.0));
        assert_eq!(c.point(Handle::E), Point::new(400.0, 100.0));
        assert_eq!(c.point(Handle::Se), Point::new(400.0, 200.0));
        assert_eq!(c.bounding_rect(), Rect::new(0.0, 0.0, 400.0, 200.0));
    }

    #[test]
    fn test_hit_test_radius_and_order() {
        let c = crop();
        // Radius is 3 * 10
        assert_eq!(c.hit_test(Point::new(29.0, 30.0)), Some(Handle::Nw));
        assert_eq!(c.hit_test(Point::new(31.0, 0.0)), None);
        assert_eq!(c.hit_test(Point::new(205.0, 195.0)), Some(Handle::S));
        assert_eq!(c.hit_test(Point::new(200.0, 100.0)), None);

        // With points stacked, the first in hit order wins
        let mut c = PolygonCrop::new(20.0, 20.0, false, 10.0);
        assert_eq!(c.hit_test(Point::new(10.0, 10.0)), Some(Handle::Nw));
        c.begin_resize(Handle::Nw);
        c.update_resize(Point::new(-100.0, -100.0));
        c.end_resize();
        assert_eq!(c.hit_test(Point::new(10.0, 10.0)), Some(Handle::N));
    }

    #[test]
    fn test_drag_moves_only_one_point() {
        let mut c = crop();
        assert_eq!(c.press(Point::new(398.0, 2.0)), Some(Handle::Ne));
        assert!(c.update_resize(Point::new(300.0, 50.0)));
        c.end_resize();

        assert_eq!(c.point(Handle::Ne), Point::new(300.0, 50.0));
        assert_eq!(c.point(Handle::N), Point::new(200.0, 0.0));
        assert_eq!(c.point(Handle::E), Point::new(400.0, 100.0));
        assert!(!c.update_resize(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_constrained_drag() {
        let mut c = crop();
        c.begin_resize(Handle::Se);
        c.update_resize(Point::new(1000.0, -20.0));
        assert_eq!(c.point(Handle::Se), Point::new(400.0, 0.0));

        let mut free = PolygonCrop::new(400.0, 200.0, false, 10.0);
        free.begin_resize(Handle::Se);
        free.update_resize(Point::new(1000.0, -20.0));
        assert_eq!(free.point(Handle::Se), Point::new(1000.0, -20.0));
    }

    #[test]
    fn test_press_miss() {
        let mut c = crop();
        assert_eq!(c.press(Point::new(200.0, 100.0)), None);
        assert_eq!(c.active_handle(), None);
    }

    #[test]
    fn test_outline_order() {
        let c = crop();
        let outline = c.outline();
        assert_eq!(outline[0], c.point(Handle::Nw));
        assert_eq!(outline[3], c.point(Handle::E));
        assert_eq!(outline[7], c.point(Handle::W));
    }

    #[test]
    fn test_contains() {
        let mut c = crop();
        assert!(c.contains(Point::new(200.0, 100.0)));
        assert!(!c.contains(Point::new(500.0, 100.0)));

        // Pull the north point down to the centre: top middle is now outside
        c.begin_resize(Handle::N);
        c.update_resize(Point::new(200.0, 150.0));
        assert!(!c.contains(Point::new(200.0, 50.0)));
        assert!(c.contains(Point::new(50.0, 50.0)));
    }

    #[test]
    fn test_winding_direction_independent() {
        let square = [
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
        ];
        let mut reversed = square;
        reversed.reverse();
        let inside = Point::new(5.0, 5.0);
        assert_eq!(winding_number(&square, inside).abs(), 1);
        assert_eq!(winding_number(&reversed, inside).abs(), 1);
        assert_eq!(winding_number(&square, Point::new(15.0, 5.0)), 0);
    }

    #[test]
    fn test_rescale_and_cancel() {
        let mut c = crop();
        c.rescale(0.5, 2.0);
        assert_eq!(c.point(Handle::Se), Point::new(200.0, 400.0));

        c.begin_resize(Handle::Se);
        c.update_resize(Point::new(10.0, 10.0));
        c.cancel();
        assert_eq!(c.point(Handle::Se), Point::new(200.0, 400.0));
    }
}
