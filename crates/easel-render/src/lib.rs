//! Easel Render Library
//!
//! CPU rendering for the Easel engine: a tiny-skia [`PixmapSurface`],
//! text rasterization from system fonts, view compositing, PNG export and
//! pattern image decoding.

pub mod font;
mod pattern;
mod surface;
mod view;

pub use pattern::{decode_pattern, load_pattern};
pub use surface::{PixmapSurface, encode_png};
pub use view::{DESK_COLOR, render_view};

use thiserror::Error;

/// Rendering and export errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("cannot allocate a {width}x{height} pixmap")]
    Allocation { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("image decoding failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("image has no pixels")]
    EmptyImage,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
