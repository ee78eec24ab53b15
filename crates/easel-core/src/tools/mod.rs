//! Tool system for the painting surface.
//!
//! Each tool is a set of free functions over [`Canvas`](crate::Canvas);
//! the engine picks the handler by matching on [`Tool`] and threads the
//! resulting [`Interaction`] back into the canvas.

pub(crate) mod brush;
pub(crate) mod shape;
pub(crate) mod text;

use crate::text::TextId;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Geometric shapes drawn by dragging from one corner (or centre) to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    Rectangle,
    /// Centred at the press point, radius reaching the release point.
    Circle,
    Line,
}

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tool {
    /// Freehand strokes painted straight onto the surface.
    #[default]
    Brush,
    Shape(ShapeKind),
    /// Place and drag text items before committing them.
    Text,
}

impl Tool {
    /// Cursor shown over the surface while the tool is idle.
    pub fn cursor(self) -> Cursor {
        match self {
            Tool::Brush | Tool::Shape(_) => Cursor::Crosshair,
            Tool::Text => Cursor::Text,
        }
    }
}

/// Cursor hint for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cursor {
    #[default]
    Crosshair,
    Text,
    Grabbing,
}

/// State of the pointer interaction in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Interaction {
    /// Waiting for input.
    #[default]
    Idle,
    /// Brush stroke or shape drag, in surface coordinates.
    Drawing {
        start: Point,
        last: Point,
        /// Whether anything reached the main surface yet.
        dirty: bool,
    },
    /// Repositioning a pending text item; `grab` is the pointer offset from
    /// the item's origin.
    DraggingText { id: TextId, grab: Vec2 },
    /// Dragging the view; `last` is in screen coordinates.
    Panning { last: Point },
    /// Two-finger gesture; touch points in screen coordinates.
    PinchZoom { touches: [Point; 2] },
}

impl Interaction {
    pub fn is_idle(&self) -> bool {
        matches!(self, Interaction::Idle)
    }

    /// Cursor while this interaction is running, if it overrides the tool's.
    pub fn cursor(&self) -> Option<Cursor> {
        match self {
            Interaction::Panning { .. } | Interaction::PinchZoom { .. } | Interaction::DraggingText { .. } => {
                Some(Cursor::Grabbing)
            }
            Interaction::Idle | Interaction::Drawing { .. } => None,
        }
    }
}
