//! The drawing engine: owns the canvas and routes queued events to the
//! tool handlers, viewport and history.

use crate::canvas::Canvas;
use crate::color::PaintColor;
use crate::config::EngineConfig;
use crate::event::{Command, Event, EventQueue, Notice};
use crate::history::HistoryStatus;
use crate::input::{InputEvent, Modifiers, MouseButton};
use crate::settings::BrushSettings;
use crate::surface::Surface;
use crate::text::TextItems;
use crate::tools::{Cursor, Interaction, Tool, brush, shape, text};
use crate::viewport::Viewport;
use kurbo::{Point, Size, Vec2};
use thiserror::Error;

/// Why an engine could not be constructed.
#[derive(Debug, Error, PartialEq)]
pub enum InitError {
    #[error("surface has no drawable area ({0:?})")]
    EmptySurface(Size),
    #[error("overlay size {overlay:?} does not match surface size {surface:?}")]
    OverlayMismatch { surface: Size, overlay: Size },
    #[error("invalid zoom bounds: min {min}, max {max}")]
    ZoomBounds { min: f64, max: f64 },
    #[error("zoom step must be a finite factor above 1, got {0}")]
    ZoomStep(f64),
    #[error("history must keep at least one undo step")]
    ZeroHistory,
}

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("drawing engine failed to initialize: {0}")]
    Init(#[from] InitError),
}

fn validate(config: &EngineConfig, surface: Size, overlay: Size) -> Result<(), InitError> {
    let has_area = |size: Size| size.width.is_finite() && size.height.is_finite() && !size.is_zero_area();
    if !has_area(surface) || surface.width < 0.0 || surface.height < 0.0 {
        return Err(InitError::EmptySurface(surface));
    }
    if overlay != surface {
        return Err(InitError::OverlayMismatch { surface, overlay });
    }
    let (min, max) = (config.min_zoom, config.max_zoom);
    if !(min.is_finite() && max.is_finite() && min > 0.0 && min <= max) {
        return Err(InitError::ZoomBounds { min, max });
    }
    if !(config.zoom_step.is_finite() && config.zoom_step > 1.0) {
        return Err(InitError::ZoomStep(config.zoom_step));
    }
    if config.max_history == 0 {
        return Err(InitError::ZeroHistory);
    }
    Ok(())
}

/// Single-threaded painting engine.
///
/// Events are queued with [`Engine::push`] and processed in order by
/// [`Engine::run_pending`]; each one runs to completion before the next.
/// Changes the host should mirror in its UI are collected as [`Notice`]s.
pub struct Engine<S: Surface> {
    config: EngineConfig,
    canvas: Canvas<S>,
    queue: EventQueue,
    notices: Vec<Notice>,
    last_status: HistoryStatus,
    last_cursor: Cursor,
    /// Last pointer position in screen space, used when a touch lifts.
    last_pointer: Point,
}

impl<S: Surface> Engine<S> {
    /// Build an engine over a main surface and an overlay of the same size.
    ///
    /// Both are cleared and the blank main surface becomes the oldest
    /// history state.
    pub fn new(config: EngineConfig, surface: S, overlay: S) -> Result<Self, EngineError> {
        validate(&config, surface.size(), overlay.size())?;

        let viewport = Viewport::new(config.min_zoom, config.max_zoom);
        let settings = BrushSettings::from_config(&config);
        let canvas = Canvas::new(surface, overlay, config.background, config.max_history, viewport, settings);
        let last_status = canvas.history_status();
        let last_cursor = canvas.tool().cursor();

        log::info!(
            "Engine ready: {}x{} surface, {} undo steps",
            canvas.bounds().width(),
            canvas.bounds().height(),
            config.max_history
        );

        Ok(Self {
            config,
            canvas,
            queue: EventQueue::new(),
            notices: Vec::new(),
            last_status,
            last_cursor,
            last_pointer: Point::ZERO,
        })
    }

    /// Queue an event for the next [`Engine::run_pending`].
    pub fn push(&mut self, event: impl Into<Event>) {
        self.queue.push(event);
    }

    /// Number of queued events.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drain the queue in order. Returns how many events were handled.
    pub fn run_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.queue.pop() {
            self.dispatch(event);
            handled += 1;
        }
        handled
    }

    /// Handle one event immediately.
    pub fn dispatch(&mut self, event: Event) {
        match event {
            Event::Input(input) => self.handle_input(input),
            Event::Command(command) => self.handle_command(command),
        }
        self.collect_notices();
    }

    /// Take the notices raised since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn canvas(&self) -> &Canvas<S> {
        &self.canvas
    }

    /// The committed drawing.
    pub fn surface(&self) -> &S {
        self.canvas.surface()
    }

    pub fn overlay(&self) -> &S {
        self.canvas.overlay()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.canvas.viewport
    }

    pub fn settings(&self) -> &BrushSettings {
        &self.canvas.settings
    }

    pub fn tool(&self) -> Tool {
        self.canvas.tool()
    }

    pub fn interaction(&self) -> Interaction {
        self.canvas.interaction()
    }

    pub fn text_items(&self) -> &TextItems {
        self.canvas.text_items()
    }

    pub fn history_status(&self) -> HistoryStatus {
        self.canvas.history_status()
    }

    /// Cursor the host should show over the surface.
    pub fn cursor(&self) -> Cursor {
        self.canvas.interaction.cursor().unwrap_or_else(|| self.canvas.tool.cursor())
    }

    fn collect_notices(&mut self) {
        let status = self.history_status();
        if status != self.last_status {
            self.last_status = status;
            self.notices.push(Notice::HistoryChanged(status));
        }
        let cursor = self.cursor();
        if cursor != self.last_cursor {
            self.last_cursor = cursor;
            self.notices.push(Notice::CursorChanged(cursor));
        }
    }

    // --- input ---

    fn handle_input(&mut self, input: InputEvent) {
        match input {
            InputEvent::PointerDown {
                position,
                button,
                modifiers,
            } => self.pointer_down(position, button, modifiers),
            InputEvent::PointerMove { position } => self.pointer_move(position),
            InputEvent::PointerUp { position, .. } => self.pointer_up(position),
            InputEvent::TouchStart { touches } => self.touch_start(&touches),
            InputEvent::TouchMove { touches } => self.touch_move(&touches),
            InputEvent::TouchEnd { touches } => self.touch_end(&touches),
            InputEvent::Wheel { position, delta } => self.wheel(position, delta),
        }
    }

    fn pointer_down(&mut self, position: Point, button: MouseButton, modifiers: Modifiers) {
        self.last_pointer = position;
        if !self.canvas.interaction.is_idle() {
            log::debug!("Press ignored during {:?}", self.canvas.interaction);
            return;
        }

        if button == MouseButton::Middle || modifiers.pans() {
            self.canvas.interaction = Interaction::Panning { last: position };
            return;
        }
        if button != MouseButton::Left {
            return;
        }

        let point = self.canvas.viewport.screen_to_surface(position);
        self.canvas.interaction = match self.canvas.tool {
            Tool::Brush => brush::begin(point),
            Tool::Shape(_) => shape::begin(point),
            Tool::Text => text::pointer_down(&mut self.canvas, point),
        };
    }

    fn pointer_move(&mut self, position: Point) {
        self.last_pointer = position;
        let point = self.canvas.viewport.screen_to_surface(position);
        let canvas = &mut self.canvas;

        match canvas.interaction {
            Interaction::Idle | Interaction::PinchZoom { .. } => {}
            Interaction::Drawing { start, last, dirty } => {
                canvas.interaction = match canvas.tool {
                    Tool::Brush => brush::extend(canvas, start, last, point),
                    Tool::Shape(kind) => shape::preview(canvas, kind, start, point),
                    Tool::Text => Interaction::Drawing { start, last, dirty },
                };
            }
            Interaction::DraggingText { id, grab } => text::drag(canvas, id, grab, point),
            Interaction::Panning { last } => {
                canvas.viewport.pan(position - last);
                canvas.interaction = Interaction::Panning { last: position };
            }
        }
    }

    fn pointer_up(&mut self, position: Point) {
        self.last_pointer = position;
        let point = self.canvas.viewport.screen_to_surface(position);
        let canvas = &mut self.canvas;

        match canvas.interaction {
            Interaction::Idle | Interaction::PinchZoom { .. } => return,
            Interaction::Drawing { start, dirty, .. } => match canvas.tool {
                Tool::Brush => brush::finish(canvas, dirty),
                Tool::Shape(kind) => shape::commit(canvas, kind, start, point),
                Tool::Text => {}
            },
            Interaction::DraggingText { id, grab } => text::drag(canvas, id, grab, point),
            Interaction::Panning { .. } => {}
        }
        canvas.interaction = Interaction::Idle;
    }

    fn touch_start(&mut self, touches: &[Point]) {
        match touches {
            [] => {}
            [only] => self.pointer_down(*only, MouseButton::Left, Modifiers::default()),
            [first, second, ..] => self.begin_pinch([*first, *second]),
        }
    }

    fn touch_move(&mut self, touches: &[Point]) {
        match (touches, self.canvas.interaction) {
            ([first, second, ..], Interaction::PinchZoom { touches: prev }) => {
                let next = [*first, *second];
                self.canvas.viewport.pinch(prev, next);
                self.canvas.interaction = Interaction::PinchZoom { touches: next };
            }
            ([first, second, ..], _) => self.begin_pinch([*first, *second]),
            ([only], _) => self.pointer_move(*only),
            ([], _) => {}
        }
    }

    /// `remaining` are the touches still down after one lifted.
    fn touch_end(&mut self, remaining: &[Point]) {
        if let Interaction::PinchZoom { .. } = self.canvas.interaction {
            self.canvas.interaction = match remaining {
                [first, second, ..] => Interaction::PinchZoom {
                    touches: [*first, *second],
                },
                // The lifted finger ends the gesture; the other one does not
                // start drawing.
                _ => Interaction::Idle,
            };
            return;
        }
        if remaining.is_empty() {
            self.pointer_up(self.last_pointer);
        }
    }

    fn begin_pinch(&mut self, touches: [Point; 2]) {
        self.cancel_interaction();
        log::debug!("Pinch started");
        self.canvas.interaction = Interaction::PinchZoom { touches };
    }

    fn wheel(&mut self, position: Point, delta: Vec2) {
        if delta.y == 0.0 {
            return;
        }
        let factor = if delta.y < 0.0 {
            self.config.zoom_step
        } else {
            1.0 / self.config.zoom_step
        };
        self.canvas.viewport.zoom_at(position, factor);
    }

    /// Abandon the current interaction without committing anything.
    fn cancel_interaction(&mut self) {
        if let Interaction::Drawing { dirty, .. } = self.canvas.interaction {
            if dirty {
                self.canvas.revert_uncommitted();
            }
            self.canvas.redraw_overlay();
            log::debug!("Cancelled uncommitted drawing");
        }
        self.canvas.interaction = Interaction::Idle;
    }

    // --- commands ---

    fn handle_command(&mut self, command: Command) {
        let size = self.canvas.surface.size();
        let step = self.config.zoom_step;

        match command {
            Command::Undo => {
                self.cancel_interaction();
                if !self.canvas.undo() {
                    log::debug!("Nothing to undo");
                }
            }
            Command::Redo => {
                self.cancel_interaction();
                if !self.canvas.redo() {
                    log::debug!("Nothing to redo");
                }
            }
            Command::Clear => {
                self.cancel_interaction();
                self.canvas.clear();
            }
            Command::ZoomIn => self.canvas.viewport.zoom_in(size, step),
            Command::ZoomOut => self.canvas.viewport.zoom_out(size, step),
            Command::ResetZoom => self.canvas.viewport.reset(),
            Command::SetTool(tool) => self.set_tool(tool),
            Command::SetColor(color) => self.canvas.settings.set_color(color),
            Command::SetBrushSize(size) => {
                if size.is_finite() {
                    self.canvas.settings.set_size(size);
                } else {
                    log::warn!("Ignoring brush size {size}");
                }
            }
            Command::SetBrushCap(cap) => self.canvas.settings.cap = cap,
            Command::SetShapeStyle(style) => self.canvas.settings.shape_style = style,
            Command::SetFillKind(fill) => self.canvas.settings.fill = fill,
            Command::SetGradientKind(kind) => self.canvas.settings.gradient.kind = kind,
            Command::SetGradientDirection(direction) => self.canvas.settings.gradient.direction = direction,
            Command::SetGradientStop { index, color } => match self.canvas.settings.gradient.colors.get_mut(index) {
                Some(stop) => *stop = color,
                None => log::warn!("No gradient stop at index {index}"),
            },
            Command::AddColorStop => self.canvas.settings.gradient.colors.push(PaintColor::BLACK),
            Command::SelectPattern(pattern) => self.canvas.settings.select_pattern(pattern),
            Command::SetCustomPattern(tile) => self.canvas.settings.set_custom_pattern(tile),
            Command::SetText(content) => self.canvas.settings.text.content = content,
            Command::SetFontFamily(family) => self.canvas.settings.text.font_family = family,
            Command::SetFontSize(font_size) => {
                if font_size.is_finite() && font_size > 0.0 {
                    self.canvas.settings.text.font_size = font_size;
                } else {
                    log::warn!("Ignoring font size {font_size}");
                }
            }
            Command::CommitText => {
                text::commit(&mut self.canvas);
            }
        }
    }

    fn set_tool(&mut self, tool: Tool) {
        if self.canvas.tool == tool {
            return;
        }
        self.cancel_interaction();
        if self.canvas.tool == Tool::Text {
            text::commit(&mut self.canvas);
        }
        log::debug!("Tool {:?} -> {:?}", self.canvas.tool, tool);
        self.canvas.tool = tool;
    }
}
