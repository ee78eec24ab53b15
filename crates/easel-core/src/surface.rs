//! Drawing surface abstraction.

use crate::color::PaintColor;
use crate::paint::Paint;
use crate::text::TextItem;
use kurbo::{BezPath, Size, Stroke};

/// Average glyph advance as a fraction of the font size, used when a
/// surface cannot measure text itself.
pub const APPROX_ADVANCE_EM: f64 = 0.6;

/// A pixel buffer the engine renders into.
///
/// The engine owns two surfaces of the same type: the main surface that
/// holds committed drawing, and a transparent overlay for live previews.
/// Implementations rasterize immediately; there is no retained scene.
pub trait Surface {
    /// Full raster copy used by the undo history.
    type Snapshot: Clone;

    /// Size in surface pixels.
    fn size(&self) -> Size;

    /// Replace every pixel with `color`.
    fn clear(&mut self, color: PaintColor);

    /// Fill a closed path.
    fn fill(&mut self, path: &BezPath, paint: &Paint);

    /// Stroke a path outline.
    fn stroke(&mut self, path: &BezPath, style: &Stroke, paint: &Paint);

    /// Rasterize a text item with its baseline origin at `item.position`.
    fn fill_text(&mut self, item: &TextItem);

    /// Advance width of `content` set in the given font.
    fn measure_text(&self, content: &str, _font_family: &str, font_size: f64) -> f64 {
        content.chars().count() as f64 * font_size * APPROX_ADVANCE_EM
    }

    /// Capture the whole surface.
    fn snapshot(&self) -> Self::Snapshot;

    /// Overwrite the whole surface with a snapshot taken earlier.
    fn restore(&mut self, snapshot: &Self::Snapshot);
}

#[cfg(test)]
pub(crate) mod recording {
    //! Deterministic in-memory surface for engine tests.

    use super::*;
    use kurbo::{Cap, Rect, Shape};

    /// A primitive as it reached the surface.
    #[derive(Debug, Clone, PartialEq)]
    pub enum SurfaceOp {
        Clear(PaintColor),
        Fill {
            bounds: Rect,
            paint: Paint,
        },
        Stroke {
            bounds: Rect,
            width: f64,
            round_cap: bool,
            paint: Paint,
        },
        Text {
            content: String,
            position: kurbo::Point,
            color: PaintColor,
        },
    }

    /// Records primitives instead of rasterizing them. Its "pixels" are the
    /// op list since the last clear, so snapshots compare exactly.
    #[derive(Debug, Clone)]
    pub struct RecordingSurface {
        size: Size,
        ops: Vec<SurfaceOp>,
    }

    impl RecordingSurface {
        pub fn new(width: f64, height: f64) -> Self {
            Self {
                size: Size::new(width, height),
                ops: Vec::new(),
            }
        }

        pub fn ops(&self) -> &[SurfaceOp] {
            &self.ops
        }

        /// Ops drawn since the last clear, without the clear itself.
        pub fn drawn(&self) -> Vec<&SurfaceOp> {
            self.ops
                .iter()
                .filter(|op| !matches!(op, SurfaceOp::Clear(_)))
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        type Snapshot = Vec<SurfaceOp>;

        fn size(&self) -> Size {
            self.size
        }

        fn clear(&mut self, color: PaintColor) {
            self.ops.clear();
            self.ops.push(SurfaceOp::Clear(color));
        }

        fn fill(&mut self, path: &BezPath, paint: &Paint) {
            self.ops.push(SurfaceOp::Fill {
                bounds: path.bounding_box(),
                paint: paint.clone(),
            });
        }

        fn stroke(&mut self, path: &BezPath, style: &Stroke, paint: &Paint) {
            self.ops.push(SurfaceOp::Stroke {
                bounds: path.bounding_box(),
                width: style.width,
                round_cap: style.start_cap == Cap::Round,
                paint: paint.clone(),
            });
        }

        fn fill_text(&mut self, item: &TextItem) {
            self.ops.push(SurfaceOp::Text {
                content: item.content.clone(),
                position: item.position,
                color: item.color,
            });
        }

        fn snapshot(&self) -> Self::Snapshot {
            self.ops.clone()
        }

        fn restore(&mut self, snapshot: &Self::Snapshot) {
            self.ops = snapshot.clone();
        }
    }
}
