//! Freehand brush.

use super::Interaction;
use crate::canvas::Canvas;
use crate::surface::Surface;
use kurbo::{BezPath, Point};

/// Start a stroke. Nothing is painted until the pointer moves.
pub(crate) fn begin(point: Point) -> Interaction {
    Interaction::Drawing {
        start: point,
        last: point,
        dirty: false,
    }
}

/// Paint the segment from `last` to `point` on the main surface.
pub(crate) fn extend<S: Surface>(canvas: &mut Canvas<S>, start: Point, last: Point, point: Point) -> Interaction {
    let mut path = BezPath::new();
    path.move_to(last);
    path.line_to(point);

    // Gradients span the whole surface so consecutive segments line up.
    let paint = canvas.settings.resolve_paint(canvas.bounds());
    let stroke = canvas.settings.brush_stroke();
    canvas.surface.stroke(&path, &stroke, &paint);

    Interaction::Drawing {
        start,
        last: point,
        dirty: true,
    }
}

/// End the stroke, recording it if anything was painted.
pub(crate) fn finish<S: Surface>(canvas: &mut Canvas<S>, dirty: bool) {
    if dirty {
        canvas.save_state();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PaintColor;
    use crate::paint::Paint;
    use crate::settings::{BrushCap, BrushSettings};
    use crate::surface::recording::{RecordingSurface, SurfaceOp};
    use crate::viewport::Viewport;
    use kurbo::Rect;

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

    #[test]
    fn test_segment_uses_brush_settings() {
        let mut canvas = canvas();
        canvas.settings.set_color(PaintColor::rgb(255, 0, 0));
        canvas.settings.set_size(8.0);
        canvas.settings.cap = BrushCap::Square;

        let start = Point::new(10.0, 10.0);
        let next = extend(&mut canvas, start, start, Point::new(30.0, 20.0));
        assert_eq!(
            next,
            Interaction::Drawing {
                start,
                last: Point::new(30.0, 20.0),
                dirty: true
            }
        );

        let drawn = canvas.surface().drawn();
        assert_eq!(
            drawn,
            vec![&SurfaceOp::Stroke {
                bounds: Rect::new(10.0, 10.0, 30.0, 20.0),
                width: 8.0,
                round_cap: false,
                paint: Paint::Solid(PaintColor::rgb(255, 0, 0)),
            }]
        );
        assert!(canvas.overlay().drawn().is_empty());
    }

    #[test]
    fn test_click_without_move_is_not_recorded() {
        let mut canvas = canvas();
        let Interaction::Drawing { dirty, .. } = begin(Point::new(5.0, 5.0)) else {
            panic!("brush should start drawing");
        };
        finish(&mut canvas, dirty);
        assert!(!canvas.history_status().can_undo);
    }

    #[test]
    fn test_finished_stroke_is_recorded() {
        let mut canvas = canvas();
        let start = Point::new(5.0, 5.0);
        extend(&mut canvas, start, start, Point::new(6.0, 6.0));
        finish(&mut canvas, true);
        assert!(canvas.history_status().can_undo);
    }
}
