//! A painting session: the engine over two pixmaps, fed from a script.

use crate::AppError;
use crate::config::AppConfig;
use crate::script::{Script, ScriptEntry};
use crate::shortcuts::ShortcutRegistry;
use easel_core::{Command, Engine, Notice};
use easel_render::{PixmapSurface, load_pattern, render_view};
use std::path::Path;

pub struct Session {
    engine: Engine<PixmapSurface>,
}

impl Session {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let surface = PixmapSurface::new(config.width, config.height)?;
        let overlay = PixmapSurface::new(config.width, config.height)?;
        let engine = Engine::new(config.engine.clone(), surface, overlay)?;
        Ok(Self { engine })
    }

    pub fn engine(&self) -> &Engine<PixmapSurface> {
        &self.engine
    }

    /// Queue every script entry and run the dispatch loop.
    /// Returns the number of events handled.
    pub fn play(&mut self, script: &Script) -> Result<usize, AppError> {
        for entry in &script.entries {
            match entry {
                ScriptEntry::Event(event) => self.engine.push(event.clone()),
                ScriptEntry::LoadPattern { load_pattern: path } => {
                    let tile = load_pattern(script.resolve(path))?;
                    self.engine.push(Command::SetCustomPattern(tile));
                }
                ScriptEntry::Key { key, ctrl, shift } => match ShortcutRegistry::lookup(key, *ctrl, *shift) {
                    Some(command) => self.engine.push(command),
                    None => log::warn!("No shortcut bound to {key:?} (ctrl: {ctrl}, shift: {shift})"),
                },
            }
        }

        let handled = self.engine.run_pending();
        for notice in self.engine.take_notices() {
            match notice {
                Notice::HistoryChanged(status) => {
                    log::debug!("Undo {}, redo {}", status.can_undo, status.can_redo)
                }
                Notice::CursorChanged(cursor) => log::debug!("Cursor {cursor:?}"),
            }
        }
        Ok(handled)
    }

    /// Write the committed drawing as PNG.
    pub fn export(&self, path: &Path) -> Result<(), AppError> {
        self.engine.surface().save_png(path)?;
        Ok(())
    }

    /// Write what the screen would show: both layers through the viewport.
    pub fn export_view(&self, path: &Path) -> Result<(), AppError> {
        let surface = self.engine.surface();
        let view = render_view(
            surface,
            self.engine.overlay(),
            self.engine.viewport(),
            surface.width(),
            surface.height(),
        )?;
        view.save_png(path)?;
        Ok(())
    }
}
