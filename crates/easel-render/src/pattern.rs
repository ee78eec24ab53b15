//! Decoding user-supplied images into pattern tiles.

use crate::RenderError;
use easel_core::PatternTile;
use std::path::Path;

/// Decode an encoded image (PNG, JPEG, WebP) into a pattern tile.
pub fn decode_pattern(bytes: &[u8]) -> Result<PatternTile, RenderError> {
    let image = image::load_from_memory(bytes)?.to_rgba8();
    let (width, height) = image.dimensions();
    PatternTile::from_rgba8(width, height, image.as_raw()).ok_or(RenderError::EmptyImage)
}

/// Read and decode a pattern image from disk.
pub fn load_pattern(path: impl AsRef<Path>) -> Result<PatternTile, RenderError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let tile = decode_pattern(&bytes)?;
    log::info!("Loaded {}x{} pattern from {}", tile.width(), tile.height(), path.display());
    Ok(tile)
}
