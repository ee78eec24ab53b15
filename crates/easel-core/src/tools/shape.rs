//! Rectangle, circle and line tools.

use super::{Interaction, ShapeKind};
use crate::canvas::Canvas;
use crate::color::PaintColor;
use crate::settings::{BrushSettings, ShapeStyle};
use crate::surface::Surface;
use kurbo::{BezPath, Circle, Line, Point, Rect, Shape};

/// Tolerance used when flattening circles to paths.
const PATH_TOLERANCE: f64 = 0.1;

/// Outline of a shape dragged from `start` to `end`, with whether it is
/// closed. Returns `None` for degenerate drags.
pub(crate) fn geometry(kind: ShapeKind, start: Point, end: Point) -> Option<(BezPath, bool)> {
    match kind {
        ShapeKind::Rectangle => {
            let rect = Rect::from_points(start, end);
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                return None;
            }
            Some((rect.to_path(PATH_TOLERANCE), true))
        }
        ShapeKind::Circle => {
            let radius = start.distance(end);
            if radius <= 0.0 {
                return None;
            }
            Some((Circle::new(start, radius).to_path(PATH_TOLERANCE), true))
        }
        ShapeKind::Line => {
            if start == end {
                return None;
            }
            Some((Line::new(start, end).to_path(PATH_TOLERANCE), false))
        }
    }
}

/// Draw the shape onto `surface`. Returns whether anything was drawn.
fn render<S: Surface>(surface: &mut S, settings: &BrushSettings, kind: ShapeKind, start: Point, end: Point) -> bool {
    let Some((path, closed)) = geometry(kind, start, end) else {
        return false;
    };
    let paint = settings.resolve_paint(path.bounding_box());
    if closed && settings.shape_style == ShapeStyle::Fill {
        surface.fill(&path, &paint);
    } else {
        surface.stroke(&path, &settings.shape_stroke(), &paint);
    }
    true
}

pub(crate) fn begin(point: Point) -> Interaction {
    Interaction::Drawing {
        start: point,
        last: point,
        dirty: false,
    }
}

/// Redraw the live preview on the overlay. The main surface is untouched.
pub(crate) fn preview<S: Surface>(canvas: &mut Canvas<S>, kind: ShapeKind, start: Point, point: Point) -> Interaction {
    canvas.overlay.clear(PaintColor::TRANSPARENT);
    render(&mut canvas.overlay, &canvas.settings, kind, start, point);
    Interaction::Drawing {
        start,
        last: point,
        dirty: false,
    }
}

/// Commit the final shape to the main surface and record it.
pub(crate) fn commit<S: Surface>(canvas: &mut Canvas<S>, kind: ShapeKind, start: Point, end: Point) {
    canvas.overlay.clear(PaintColor::TRANSPARENT);
    if render(&mut canvas.surface, &canvas.settings, kind, start, end) {
        canvas.save_state();
    } else {
        log::debug!("Skipped degenerate {kind:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::{FillKind, Paint};
    use crate::surface::recording::{RecordingSurface, SurfaceOp};
    use crate::viewport::Viewport;

    fn canvas() -> Canvas<RecordingSurface> {
        Canvas::new(
            RecordingSurface::new(200.0, 200.0),
            RecordingSurface::new(200.0, 200.0),
            PaintColor::WHITE,
            10,
            Viewport::default(),
            BrushSettings::default(),
        )
    }

    fn assert_rect_eq(a: Rect, b: Rect) {
        let close = |x: f64, y: f64| (x - y).abs() < 0.5;
        assert!(
            close(a.x0, b.x0) && close(a.y0, b.y0) && close(a.x1, b.x1) && close(a.y1, b.y1),
            "{a:?} != {b:?}"
        );
    }

    #[test]
    fn test_rectangle_geometry_normalizes_corners() {
        let (path, closed) = geometry(ShapeKind::Rectangle, Point::new(50.0, 40.0), Point::new(10.0, 20.0)).unwrap();
        assert!(closed);
        assert_eq!(path.bounding_box(), Rect::new(10.0, 20.0, 50.0, 40.0));
    }

    #[test]
    fn test_circle_centred_on_start() {
        let (path, closed) = geometry(ShapeKind::Circle, Point::new(100.0, 100.0), Point::new(130.0, 140.0)).unwrap();
        assert!(closed);
        assert_rect_eq(path.bounding_box(), Rect::new(50.0, 50.0, 150.0, 150.0));
    }

    #[test]
    fn test_degenerate_shapes() {
        let p = Point::new(3.0, 3.0);
        assert!(geometry(ShapeKind::Rectangle, p, Point::new(3.0, 9.0)).is_none());
        assert!(geometry(ShapeKind::Circle, p, p).is_none());
        assert!(geometry(ShapeKind::Line, p, p).is_none());
        let (_, closed) = geometry(ShapeKind::Line, p, Point::new(9.0, 3.0)).unwrap();
        assert!(!closed);
    }

    #[test]
    fn test_preview_only_touches_overlay() {
        let mut canvas = canvas();
        let start = Point::new(10.0, 10.0);
        preview(&mut canvas, ShapeKind::Rectangle, start, Point::new(20.0, 20.0));
        preview(&mut canvas, ShapeKind::Rectangle, start, Point::new(40.0, 30.0));

        assert!(canvas.surface().drawn().is_empty());
        let overlay = canvas.overlay().drawn();
        assert_eq!(overlay.len(), 1, "old previews are cleared");
        assert!(matches!(
            overlay[0],
            SurfaceOp::Fill { bounds, .. } if *bounds == Rect::new(10.0, 10.0, 40.0, 30.0)
        ));
        assert!(!canvas.history_status().can_undo);
    }

    #[test]
    fn test_commit_moves_shape_to_surface() {
        let mut canvas = canvas();
        let start = Point::new(10.0, 10.0);
        preview(&mut canvas, ShapeKind::Rectangle, start, Point::new(40.0, 30.0));
        commit(&mut canvas, ShapeKind::Rectangle, start, Point::new(40.0, 30.0));

        assert!(canvas.overlay().drawn().is_empty());
        assert_eq!(canvas.surface().drawn().len(), 1);
        assert!(canvas.history_status().can_undo);
    }

    #[test]
    fn test_stroke_style_outlines_shapes() {
        let mut canvas = canvas();
        canvas.settings.shape_style = ShapeStyle::Stroke;
        commit(&mut canvas, ShapeKind::Circle, Point::new(50.0, 50.0), Point::new(60.0, 50.0));
        assert!(matches!(canvas.surface().drawn()[0], SurfaceOp::Stroke { round_cap: true, .. }));
    }

    #[test]
    fn test_line_is_always_stroked() {
        let mut canvas = canvas();
        canvas.settings.shape_style = ShapeStyle::Fill;
        commit(&mut canvas, ShapeKind::Line, Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert!(matches!(canvas.surface().drawn()[0], SurfaceOp::Stroke { .. }));
    }

    #[test]
    fn test_gradient_spans_shape_bounds() {
        let mut canvas = canvas();
        canvas.settings.fill = FillKind::Gradient;
        commit(&mut canvas, ShapeKind::Rectangle, Point::new(20.0, 20.0), Point::new(60.0, 40.0));
        let drawn = canvas.surface().drawn();
        let SurfaceOp::Fill {
            paint: Paint::LinearGradient { start, end, .. },
            ..
        } = drawn[0]
        else {
            panic!("expected gradient fill");
        };
        assert_eq!((*start, *end), (Point::new(20.0, 30.0), Point::new(60.0, 30.0)));
    }

    #[test]
    fn test_degenerate_commit_is_not_recorded() {
        let mut canvas = canvas();
        let p = Point::new(10.0, 10.0);
        commit(&mut canvas, ShapeKind::Rectangle, p, p);
        assert!(canvas.surface().drawn().is_empty());
        assert!(!canvas.history_status().can_undo);
    }
}
