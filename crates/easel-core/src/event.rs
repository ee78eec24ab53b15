//! Engine events: raw input plus commands from the host's controls.

use crate::color::PaintColor;
use crate::history::HistoryStatus;
use crate::input::InputEvent;
use crate::paint::{FillKind, GradientDirection, GradientKind, Pattern, PatternTile};
use crate::settings::{BrushCap, ShapeStyle};
use crate::tools::{Cursor, Tool};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Actions triggered by buttons, pickers and shortcuts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Command {
    Undo,
    Redo,
    /// Wipe the surface to the background colour (undoable).
    Clear,
    ZoomIn,
    ZoomOut,
    ResetZoom,
    SetTool(Tool),
    SetColor(PaintColor),
    SetBrushSize(f64),
    SetBrushCap(BrushCap),
    SetShapeStyle(ShapeStyle),
    SetFillKind(FillKind),
    SetGradientKind(GradientKind),
    SetGradientDirection(GradientDirection),
    /// Replace the colour of an existing gradient stop.
    SetGradientStop { index: usize, color: PaintColor },
    /// Append a black stop to the gradient.
    AddColorStop,
    SelectPattern(Pattern),
    SetCustomPattern(PatternTile),
    SetText(String),
    SetFontFamily(String),
    SetFontSize(f64),
    /// Rasterize pending text items onto the surface.
    CommitText,
}

/// Anything the dispatch loop consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    Input(InputEvent),
    Command(Command),
}

impl From<InputEvent> for Event {
    fn from(event: InputEvent) -> Self {
        Event::Input(event)
    }
}

impl From<Command> for Event {
    fn from(command: Command) -> Self {
        Event::Command(command)
    }
}

/// State changes the host should reflect in its UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Undo/redo buttons should be enabled accordingly.
    HistoryChanged(HistoryStatus),
    CursorChanged(Cursor),
}

/// FIFO of events waiting to be dispatched.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: VecDeque<Event>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: impl Into<Event>) {
        self.events.push_back(event.into());
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Extend<Event> for EventQueue {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, iter: I) {
        self.events.extend(iter);
    }
}
