//! Easel Application
//!
//! Headless host for the Easel engine: loads configuration and an event
//! script, replays it over tiny-skia surfaces and exports PNG files.

mod config;
mod script;
mod session;
mod shortcuts;

pub use config::{AppConfig, ConfigError};
pub use script::{Script, ScriptEntry, ScriptError};
pub use session::Session;
pub use shortcuts::{Shortcut, ShortcutRegistry};

use easel_core::EngineError;
use easel_render::RenderError;
use thiserror::Error;

/// Errors from running a session.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

impl AppError {
    /// Whether the painting surface never came up.
    pub fn is_init_failure(&self) -> bool {
        matches!(self, AppError::Engine(_) | AppError::Render(RenderError::Allocation { .. }))
    }
}

/// Frame `detail` in a box so it stands out on a terminal.
pub fn failure_banner(title: &str, detail: &str) -> String {
    let lines: Vec<&str> = std::iter::once(title).chain(detail.lines()).collect();
    let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
    let rule = format!("+{}+", "-".repeat(width + 2));

    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');
    for (i, line) in lines.iter().enumerate() {
        let pad = width - line.chars().count();
        out.push_str(&format!("| {line}{} |\n", " ".repeat(pad)));
        if i == 0 {
            out.push_str(&rule);
            out.push('\n');
        }
    }
    out.push_str(&rule);
    out
}
