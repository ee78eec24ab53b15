//! Compositing the surfaces into what the host shows on screen.

use crate::{RenderError, RenderResult};
use crate::surface::PixmapSurface;
use easel_core::{PaintColor, Viewport};
use tiny_skia::{Color, FilterQuality, Pixmap, PixmapPaint, Transform};

/// Colour of the area outside the surface.
pub const DESK_COLOR: PaintColor = PaintColor::rgb(0xe0, 0xe0, 0xe0);

fn view_transform(viewport: &Viewport) -> Transform {
    let zoom = viewport.zoom() as f32;
    Transform::from_row(zoom, 0.0, 0.0, zoom, viewport.offset.x as f32, viewport.offset.y as f32)
}

/// Draw the main surface with the overlay on top into a `width`×`height`
/// screen through the viewport transform.
pub fn render_view(
    surface: &PixmapSurface,
    overlay: &PixmapSurface,
    viewport: &Viewport,
    width: u32,
    height: u32,
) -> RenderResult<PixmapSurface> {
    let mut screen = Pixmap::new(width, height).ok_or(RenderError::Allocation { width, height })?;
    screen.fill(Color::from_rgba8(DESK_COLOR.r, DESK_COLOR.g, DESK_COLOR.b, DESK_COLOR.a));

    let transform = view_transform(viewport);
    // Pixels stay crisp when zoomed in.
    let paint = PixmapPaint {
        quality: if viewport.zoom() >= 1.0 {
            FilterQuality::Nearest
        } else {
            FilterQuality::Bilinear
        },
        ..PixmapPaint::default()
    };
    for layer in [surface, overlay] {
        screen.draw_pixmap(0, 0, layer.pixmap().as_ref(), &paint, transform, None);
    }
    Ok(PixmapSurface::from_pixmap(screen))
}
