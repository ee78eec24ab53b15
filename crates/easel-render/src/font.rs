//! System font lookup and glyph outlines.

use easel_core::TextItem;
use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use kurbo::BezPath;
use rusttype::{Font, OutlineBuilder, Scale, point as rt_point};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};

fn db() -> &'static Database {
    static DB: OnceLock<Database> = OnceLock::new();
    DB.get_or_init(|| {
        let mut db = Database::new();
        db.load_system_fonts();
        log::info!("Loaded {} system font faces", db.len());
        db
    })
}

fn families(family: &str) -> Vec<Family<'_>> {
    match family.trim() {
        "" | "sans-serif" | "Sans" => vec![Family::SansSerif],
        "serif" | "Serif" => vec![Family::Serif],
        "monospace" | "Monospace" => vec![Family::Monospace],
        "cursive" => vec![Family::Cursive],
        "fantasy" => vec![Family::Fantasy],
        other => vec![Family::Name(other), Family::SansSerif],
    }
}

fn load_font(family: &str) -> Option<Font<'static>> {
    let families = families(family);
    let query = Query {
        families: &families,
        weight: Weight::NORMAL,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };
    let id = db().query(&query)?;
    db().with_face_data(id, |data, index| Font::try_from_vec_and_index(data.to_vec(), index))
        .flatten()
}

/// Font for a CSS-style family name, cached per name. `None` when no
/// usable face is installed.
pub fn font_for(family: &str) -> Option<Arc<Font<'static>>> {
    static CACHE: OnceLock<Mutex<HashMap<String, Option<Arc<Font<'static>>>>>> = OnceLock::new();
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));

    if let Some(font) = cache.lock().unwrap_or_else(|p| p.into_inner()).get(family) {
        return font.clone();
    }

    let font = load_font(family).map(Arc::new);
    if font.is_none() {
        log::warn!("No font found for family {family:?}");
    }
    cache
        .lock()
        .unwrap_or_else(|p| p.into_inner())
        .insert(family.to_string(), font.clone());
    font
}

/// Advance width of `content` laid out on one line.
pub fn measure(font: &Font<'_>, content: &str, font_size: f64) -> f64 {
    let scale = Scale::uniform(font_size as f32);
    font.layout(content, scale, rt_point(0.0, 0.0))
        .last()
        .map(|glyph| glyph.position().x + glyph.unpositioned().h_metrics().advance_width)
        .unwrap_or(0.0) as f64
}

/// Collects rusttype outlines into a kurbo path.
struct PathSink {
    path: BezPath,
}

impl OutlineBuilder for PathSink {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.path.quad_to((x1 as f64, y1 as f64), (x as f64, y as f64));
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.path
            .curve_to((x1 as f64, y1 as f64), (x2 as f64, y2 as f64), (x as f64, y as f64));
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}

/// Glyph outlines of a text item, positioned on its baseline in surface
/// coordinates.
pub fn text_outline(font: &Font<'_>, item: &TextItem) -> BezPath {
    let scale = Scale::uniform(item.font_size as f32);
    let start = rt_point(item.position.x as f32, item.position.y as f32);
    let mut sink = PathSink { path: BezPath::new() };
    for glyph in font.layout(&item.content, scale, start) {
        glyph.build_outline(&mut sink);
    }
    sink.path
}
