//! Viewport module for zoom/pan transforms.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Pinch distances below this are treated as a single touch point.
const MIN_PINCH_DISTANCE: f64 = 1.0;

/// Viewport manages the view transform of the painting surface.
///
/// A screen point maps to the surface as `(screen - offset) / zoom`; the
/// zoom is kept within `[min_zoom, max_zoom]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewport {
    /// Current translation offset (pan), in screen pixels.
    pub offset: Vec2,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(0.1, 10.0)
    }
}

impl Viewport {
    /// Create an identity viewport with the given zoom bounds.
    ///
    /// Bounds are validated by [`Engine::new`](crate::Engine::new); here an
    /// inverted range is simply swapped.
    pub fn new(min_zoom: f64, max_zoom: f64) -> Self {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0_f64.clamp(min_zoom, max_zoom),
            min_zoom,
            max_zoom,
        }
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Transform converting surface coordinates to screen coordinates.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Transform converting screen coordinates to surface coordinates.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    pub fn screen_to_surface(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    pub fn surface_to_screen(&self, surface_point: Point) -> Point {
        self.transform() * surface_point
    }

    /// Pan by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Set the zoom directly, clamped, keeping the offset.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        }
    }

    /// Zoom by `factor`, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let surface_point = self.screen_to_surface(screen_point);
        self.zoom = new_zoom;

        // Adjust offset so surface_point stays at screen_point
        let new_screen = self.surface_to_screen(surface_point);
        self.offset += screen_point - new_screen;
    }

    /// Zoom in by `step` around the centre of a viewport of `size`.
    pub fn zoom_in(&mut self, size: Size, step: f64) {
        self.zoom_at(size.to_rect().center(), step);
    }

    /// Zoom out by `step` around the centre of a viewport of `size`.
    pub fn zoom_out(&mut self, size: Size, step: f64) {
        self.zoom_at(size.to_rect().center(), 1.0 / step);
    }

    /// Apply a two-finger gesture moving from `prev` to `next` touch points.
    ///
    /// The zoom changes by the ratio of the finger distances and the
    /// surface point under the previous midpoint ends up under the new one,
    /// so the gesture zooms and pans at once.
    pub fn pinch(&mut self, prev: [Point; 2], next: [Point; 2]) {
        let prev_distance = prev[0].distance(prev[1]);
        let next_distance = next[0].distance(next[1]);
        let prev_mid = prev[0].midpoint(prev[1]);
        let next_mid = next[0].midpoint(next[1]);

        let anchor = self.screen_to_surface(prev_mid);
        if prev_distance >= MIN_PINCH_DISTANCE && next_distance >= MIN_PINCH_DISTANCE {
            self.set_zoom(self.zoom * next_distance / prev_distance);
        }
        self.offset = next_mid.to_vec2() - anchor.to_vec2() * self.zoom;
    }

    /// Reset to identity zoom and no pan.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
        self.zoom = 1.0_f64.clamp(self.min_zoom, self.max_zoom);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_point_eq(a: Point, b: Point) {
        assert!((a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_default_viewport() {
        let viewport = Viewport::default();
        assert_eq!(viewport.offset, Vec2::ZERO);
        assert!((viewport.zoom() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_to_surface_identity() {
        let viewport = Viewport::default();
        let screen = Point::new(100.0, 200.0);
        assert_point_eq(viewport.screen_to_surface(screen), screen);
    }

    #[test]
    fn test_screen_to_surface_with_offset() {
        let mut viewport = Viewport::default();
        viewport.pan(Vec2::new(50.0, 100.0));
        assert_point_eq(
            viewport.screen_to_surface(Point::new(100.0, 200.0)),
            Point::new(50.0, 100.0),
        );
    }

    #[test]
    fn test_zoom_then_pan() {
        let mut viewport = Viewport::default();
        viewport.set_zoom(3.0);
        viewport.pan(Vec2::new(50.0, 50.0));
        let surface = viewport.screen_to_surface(Point::new(100.0, 100.0));
        assert_point_eq(surface, Point::new(50.0 / 3.0, 50.0 / 3.0));
    }

    #[test]
    fn test_roundtrip_conversion() {
        let mut viewport = Viewport::default();
        viewport.offset = Vec2::new(30.0, -20.0);
        viewport.set_zoom(1.5);

        let original = Point::new(123.0, 456.0);
        let back = viewport.surface_to_screen(viewport.screen_to_surface(original));
        assert_point_eq(back, original);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut viewport = Viewport::new(0.25, 4.0);
        viewport.zoom_at(Point::ZERO, 0.001);
        assert!((viewport.zoom() - 0.25).abs() < f64::EPSILON);

        viewport.zoom_at(Point::ZERO, 1000.0);
        assert!((viewport.zoom() - 4.0).abs() < f64::EPSILON);

        viewport.set_zoom(f64::INFINITY);
        assert!((viewport.zoom() - 4.0).abs() < f64::EPSILON);
        viewport.set_zoom(-3.0);
        assert!((viewport.zoom() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_at_keeps_point_fixed() {
        let mut viewport = Viewport::default();
        viewport.pan(Vec2::new(10.0, 20.0));
        let anchor = Point::new(200.0, 150.0);
        let before = viewport.screen_to_surface(anchor);
        viewport.zoom_at(anchor, 2.0);
        assert_point_eq(viewport.screen_to_surface(anchor), before);
    }

    #[test]
    fn test_zoom_in_out_buttons() {
        let mut viewport = Viewport::default();
        let size = Size::new(800.0, 600.0);
        viewport.zoom_in(size, 2.0);
        assert!((viewport.zoom() - 2.0).abs() < 1e-12);
        assert_point_eq(
            viewport.screen_to_surface(Point::new(400.0, 300.0)),
            Point::new(400.0, 300.0),
        );
        viewport.zoom_out(size, 2.0);
        assert!((viewport.zoom() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pinch_zooms_by_distance_ratio() {
        let mut viewport = Viewport::default();
        let prev = [Point::new(90.0, 100.0), Point::new(110.0, 100.0)];
        let next = [Point::new(80.0, 100.0), Point::new(120.0, 100.0)];
        let anchor = viewport.screen_to_surface(Point::new(100.0, 100.0));

        viewport.pinch(prev, next);

        assert!((viewport.zoom() - 2.0).abs() < 1e-12);
        assert_point_eq(viewport.screen_to_surface(Point::new(100.0, 100.0)), anchor);
    }

    #[test]
    fn test_pinch_moving_midpoint_pans() {
        let mut viewport = Viewport::default();
        let prev = [Point::new(0.0, 0.0), Point::new(20.0, 0.0)];
        let next = [Point::new(30.0, 40.0), Point::new(50.0, 40.0)];
        viewport.pinch(prev, next);

        assert!((viewport.zoom() - 1.0).abs() < 1e-12);
        assert!((viewport.offset.x - 30.0).abs() < 1e-9);
        assert!((viewport.offset.y - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_pinch_respects_bounds() {
        let mut viewport = Viewport::new(0.5, 2.0);
        let prev = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
        let next = [Point::new(0.0, 0.0), Point::new(1000.0, 0.0)];
        viewport.pinch(prev, next);
        assert!((viewport.zoom() - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset() {
        let mut viewport = Viewport::default();
        viewport.pan(Vec2::new(10.0, 20.0));
        viewport.set_zoom(3.0);
        viewport.reset();
        assert_eq!(viewport.offset, Vec2::ZERO);
        assert!((viewport.zoom() - 1.0).abs() < f64::EPSILON);
    }
}
