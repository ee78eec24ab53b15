//! tiny-skia backed drawing surface.

use crate::RenderError;
use crate::font;
use easel_core::{APPROX_ADVANCE_EM, Paint, PaintColor, PatternTile, Surface, TextItem};
use kurbo::{BezPath, Cap, Join, PathEl, Size, Stroke};
use std::path::Path;
use tiny_skia::{
    Color, ColorU8, FillRule, FilterQuality, GradientStop, LineCap, LineJoin, LinearGradient, PathBuilder, Pixmap,
    RadialGradient, Shader, SpreadMode, Transform,
};

/// A premultiplied RGBA pixel buffer.
///
/// Snapshots are full pixmap copies.
#[derive(Debug, Clone)]
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    /// Allocate a transparent surface.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let pixmap = Pixmap::new(width, height).ok_or(RenderError::Allocation { width, height })?;
        Ok(Self { pixmap })
    }

    /// Wrap an existing pixmap.
    pub fn from_pixmap(pixmap: Pixmap) -> Self {
        Self { pixmap }
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight-alpha colour of one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<PaintColor> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(PaintColor::new(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Straight-alpha RGBA8 bytes, row by row.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.pixmap.data().len());
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        data
    }

    /// Encode the surface as PNG bytes.
    pub fn export_png(&self) -> Result<Vec<u8>, RenderError> {
        encode_png(&self.to_rgba8(), self.width(), self.height())
    }

    /// Write the surface to a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let png_data = self.export_png()?;
        std::fs::write(path.as_ref(), &png_data)?;
        log::info!("Exported {} ({} bytes)", path.as_ref().display(), png_data.len());
        Ok(())
    }

    fn paint_with(&mut self, paint: &Paint, draw: impl FnOnce(&mut Pixmap, &tiny_skia::Paint<'_>)) {
        let tile = match paint {
            Paint::Pattern(tile) => match tile_pixmap(tile) {
                Some(pixmap) => Some(pixmap),
                None => {
                    log::warn!("Pattern tile could not be uploaded");
                    return;
                }
            },
            _ => None,
        };
        let sk_paint = tiny_skia::Paint {
            shader: shader(paint, tile.as_ref()),
            anti_alias: true,
            ..Default::default()
        };
        draw(&mut self.pixmap, &sk_paint);
    }
}

/// Encode straight-alpha RGBA8 data as PNG.
pub fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(rgba_data)?;
    }
    Ok(png_data)
}

fn color(c: PaintColor) -> Color {
    Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn gradient_stops(stops: &[easel_core::GradientStop]) -> Vec<GradientStop> {
    stops.iter().map(|s| GradientStop::new(s.offset, color(s.color))).collect()
}

fn first_color(stops: &[easel_core::GradientStop]) -> Color {
    stops.first().map(|s| color(s.color)).unwrap_or(Color::BLACK)
}

fn shader<'a>(paint: &Paint, tile: Option<&'a Pixmap>) -> Shader<'a> {
    match paint {
        Paint::Solid(c) => Shader::SolidColor(color(*c)),
        Paint::LinearGradient { start, end, stops } => LinearGradient::new(
            tiny_skia::Point::from_xy(start.x as f32, start.y as f32),
            tiny_skia::Point::from_xy(end.x as f32, end.y as f32),
            gradient_stops(stops),
            SpreadMode::Pad,
            Transform::identity(),
        )
        .unwrap_or_else(|| Shader::SolidColor(first_color(stops))),
        Paint::RadialGradient { center, radius, stops } => {
            let center = tiny_skia::Point::from_xy(center.x as f32, center.y as f32);
            RadialGradient::new(
                center,
                center,
                *radius as f32,
                gradient_stops(stops),
                SpreadMode::Pad,
                Transform::identity(),
            )
            .unwrap_or_else(|| Shader::SolidColor(first_color(stops)))
        }
        Paint::Pattern(_) => match tile {
            Some(pixmap) => tiny_skia::Pattern::new(
                pixmap.as_ref(),
                SpreadMode::Repeat,
                FilterQuality::Nearest,
                1.0,
                Transform::identity(),
            ),
            None => Shader::SolidColor(Color::BLACK),
        },
    }
}

/// Upload a pattern tile as a premultiplied pixmap.
fn tile_pixmap(tile: &PatternTile) -> Option<Pixmap> {
    let mut pixmap = Pixmap::new(tile.width(), tile.height())?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(tile.pixels()) {
        *dst = ColorU8::from_rgba(src.r, src.g, src.b, src.a).premultiply();
    }
    Some(pixmap)
}

fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p) => pb.quad_to(p1.x as f32, p1.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(p1, p2, p) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

fn to_skia_stroke(style: &Stroke) -> tiny_skia::Stroke {
    let line_cap = match style.start_cap {
        Cap::Butt => LineCap::Butt,
        Cap::Round => LineCap::Round,
        Cap::Square => LineCap::Square,
    };
    let line_join = match style.join {
        Join::Bevel => LineJoin::Bevel,
        Join::Miter => LineJoin::Miter,
        Join::Round => LineJoin::Round,
    };
    tiny_skia::Stroke {
        width: style.width as f32,
        miter_limit: style.miter_limit as f32,
        line_cap,
        line_join,
        dash: None,
    }
}

impl Surface for PixmapSurface {
    type Snapshot = Pixmap;

    fn size(&self) -> Size {
        Size::new(self.pixmap.width() as f64, self.pixmap.height() as f64)
    }

    fn clear(&mut self, c: PaintColor) {
        self.pixmap.fill(color(c));
    }

    fn fill(&mut self, path: &BezPath, paint: &Paint) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        self.paint_with(paint, |pixmap, sk_paint| {
            pixmap.fill_path(&path, sk_paint, FillRule::Winding, Transform::identity(), None);
        });
    }

    fn stroke(&mut self, path: &BezPath, style: &Stroke, paint: &Paint) {
        let Some(path) = to_skia_path(path) else {
            return;
        };
        let stroke = to_skia_stroke(style);
        self.paint_with(paint, |pixmap, sk_paint| {
            pixmap.stroke_path(&path, sk_paint, &stroke, Transform::identity(), None);
        });
    }

    fn fill_text(&mut self, item: &TextItem) {
        let Some(font) = font::font_for(&item.font_family) else {
            log::warn!("Skipping text {:?}: no font available", item.content);
            return;
        };
        let outline = font::text_outline(&font, item);
        self.fill(&outline, &Paint::Solid(item.color));
    }

    fn measure_text(&self, content: &str, font_family: &str, font_size: f64) -> f64 {
        match font::font_for(font_family) {
            Some(font) => font::measure(&font, content, font_size),
            None => content.chars().count() as f64 * font_size * APPROX_ADVANCE_EM,
        }
    }

    fn snapshot(&self) -> Pixmap {
        self.pixmap.clone()
    }

    fn restore(&mut self, snapshot: &Pixmap) {
        if snapshot.width() == self.pixmap.width() && snapshot.height() == self.pixmap.height() {
            self.pixmap.data_mut().copy_from_slice(snapshot.data());
        } else {
            self.pixmap = snapshot.clone();
        }
    }
}
