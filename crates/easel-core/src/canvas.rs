//! Canvas state: surfaces, history, viewport and tool settings.

use crate::color::PaintColor;
use crate::history::{History, HistoryStatus};
use crate::settings::BrushSettings;
use crate::surface::Surface;
use crate::text::TextItems;
use crate::tools::{Interaction, Tool};
use crate::viewport::Viewport;
use kurbo::Rect;

/// All mutable painting state, owned in one place and handed to the tool
/// handlers by reference.
pub struct Canvas<S: Surface> {
    /// Committed drawing.
    pub(crate) surface: S,
    /// Live previews: shape drags and pending text.
    pub(crate) overlay: S,
    pub(crate) history: History<S::Snapshot>,
    pub viewport: Viewport,
    pub settings: BrushSettings,
    pub(crate) tool: Tool,
    pub(crate) interaction: Interaction,
    pub(crate) text_items: TextItems,
    pub(crate) background: PaintColor,
}

impl<S: Surface> Canvas<S> {
    /// Clear both surfaces and record the blank state as the history root.
    pub(crate) fn new(
        mut surface: S,
        mut overlay: S,
        background: PaintColor,
        max_history: usize,
        viewport: Viewport,
        settings: BrushSettings,
    ) -> Self {
        surface.clear(background);
        overlay.clear(PaintColor::TRANSPARENT);
        let history = History::new(surface.snapshot(), max_history);
        Self {
            surface,
            overlay,
            history,
            viewport,
            settings,
            tool: Tool::default(),
            interaction: Interaction::Idle,
            text_items: TextItems::new(),
            background,
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn overlay(&self) -> &S {
        &self.overlay
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn text_items(&self) -> &TextItems {
        &self.text_items
    }

    pub fn history_status(&self) -> HistoryStatus {
        self.history.status()
    }

    pub fn history(&self) -> &History<S::Snapshot> {
        &self.history
    }

    /// Surface bounds in surface coordinates.
    pub fn bounds(&self) -> Rect {
        self.surface.size().to_rect()
    }

    /// Push the main surface onto the undo history.
    pub(crate) fn save_state(&mut self) {
        self.history.save_state(self.surface.snapshot());
        log::debug!(
            "Saved state (undo: {}, redo: {})",
            self.history.undo_len(),
            self.history.redo_len()
        );
    }

    /// Restore the previous committed state. No-op at the oldest state.
    pub(crate) fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.surface.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Re-apply the most recently undone state. No-op when nothing was undone.
    pub(crate) fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.surface.restore(snapshot);
                true
            }
            None => false,
        }
    }

    /// Drop any uncommitted pixels from the main surface.
    pub(crate) fn revert_uncommitted(&mut self) {
        self.surface.restore(self.history.current());
    }

    /// Wipe the drawing and pending text, recording the blank canvas.
    pub(crate) fn clear(&mut self) {
        self.surface.clear(self.background);
        self.overlay.clear(PaintColor::TRANSPARENT);
        self.text_items.clear();
        self.interaction = Interaction::Idle;
        self.save_state();
    }

    /// Redraw the overlay from the pending text items.
    pub(crate) fn redraw_overlay(&mut self) {
        self.overlay.clear(PaintColor::TRANSPARENT);
        for item in self.text_items.iter() {
            self.overlay.fill_text(item);
        }
    }
}
