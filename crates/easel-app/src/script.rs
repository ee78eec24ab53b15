//! JSON event scripts replayed by the headless driver.
//!
//! A script is an array whose entries are either engine events
//! (`{ "Command": "Undo" }`, `{ "Input": { "PointerMove": ... } }`), a
//! pattern upload (`{ "load_pattern": "tile.png" }`) or a key chord
//! (`{ "key": "z", "ctrl": true }`).

use easel_core::Event;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("cannot read script {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One step of a script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScriptEntry {
    Event(Event),
    /// Decode an image and use it as the custom pattern.
    LoadPattern { load_pattern: PathBuf },
    /// Keyboard shortcut, resolved through the shortcut registry.
    Key {
        key: String,
        #[serde(default)]
        ctrl: bool,
        #[serde(default)]
        shift: bool,
    },
}

#[derive(Debug, Clone)]
pub struct Script {
    pub entries: Vec<ScriptEntry>,
    /// Directory relative pattern paths are resolved against.
    base_dir: PathBuf,
}

impl Script {
    pub fn from_json(json: &str, base_dir: impl Into<PathBuf>) -> Result<Self, ScriptError> {
        Ok(Self {
            entries: serde_json::from_str(json)?,
            base_dir: base_dir.into(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let json = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let script = Self::from_json(&json, base_dir)?;
        log::info!("Loaded {} script entries from {}", script.entries.len(), path.display());
        Ok(script)
    }

    /// Resolve a path named in the script.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}
