//! Easel Core Library
//!
//! Drawing and history engine for the Easel raster painter: tools, fill
//! styles, viewport, snapshot undo/redo and the event dispatch loop.
//! Rendering backends plug in through the [`Surface`] trait.

pub mod canvas;
pub mod color;
pub mod config;
pub mod engine;
pub mod event;
pub mod history;
pub mod input;
pub mod paint;
pub mod settings;
pub mod surface;
pub mod text;
pub mod tools;
pub mod viewport;

pub use canvas::Canvas;
pub use color::{PaintColor, ParseColorError};
pub use config::{DEFAULT_MAX_HISTORY, EngineConfig};
pub use engine::{Engine, EngineError, InitError};
pub use event::{Command, Event, EventQueue, Notice};
pub use history::{History, HistoryStatus};
pub use input::{InputEvent, Modifiers, MouseButton};
pub use paint::{FillKind, GradientDirection, GradientKind, GradientSettings, GradientStop, Paint, Pattern, PatternTile};
pub use settings::{BrushCap, BrushSettings, ShapeStyle, TextSettings};
pub use surface::{APPROX_ADVANCE_EM, Surface};
pub use text::{TextId, TextItem, TextItems};
pub use tools::{Cursor, Interaction, ShapeKind, Tool};
pub use viewport::Viewport;
