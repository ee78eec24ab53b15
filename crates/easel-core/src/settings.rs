//! Brush, fill and text settings shared by every tool.

use crate::color::PaintColor;
use crate::config::EngineConfig;
use crate::paint::{FillKind, GradientSettings, Paint, Pattern, PatternTile};
use kurbo::{Cap, Join, Rect, Stroke};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// End cap of brush strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BrushCap {
    #[default]
    Round,
    Square,
}

/// Whether closed shapes are filled or outlined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShapeStyle {
    #[default]
    Fill,
    Stroke,
}

/// Options applied to newly placed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSettings {
    pub content: String,
    pub font_family: String,
    pub font_size: f64,
}

/// Everything the tool handlers need to know about the current brush.
#[derive(Debug, Clone)]
pub struct BrushSettings {
    pub color: PaintColor,
    /// Stroke width in surface pixels.
    pub size: f64,
    pub cap: BrushCap,
    pub shape_style: ShapeStyle,
    pub fill: FillKind,
    pub gradient: GradientSettings,
    pattern: Pattern,
    /// Tile for the selected pattern, regenerated when the colour changes.
    pattern_tile: Option<Arc<PatternTile>>,
    /// Last uploaded image, kept while predefined patterns are selected.
    custom_tile: Option<Arc<PatternTile>>,
    pub text: TextSettings,
}

impl BrushSettings {
    /// Smallest brush size accepted by [`BrushSettings::set_size`].
    pub const MIN_SIZE: f64 = 1.0;
    /// Largest brush size accepted by [`BrushSettings::set_size`].
    pub const MAX_SIZE: f64 = 200.0;

    pub fn from_config(config: &EngineConfig) -> Self {
        let pattern = Pattern::default();
        Self {
            color: config.color,
            size: config.brush_size.clamp(Self::MIN_SIZE, Self::MAX_SIZE),
            cap: BrushCap::default(),
            shape_style: ShapeStyle::default(),
            fill: FillKind::default(),
            gradient: GradientSettings::default(),
            pattern,
            pattern_tile: pattern.tile(config.color).map(Arc::new),
            custom_tile: None,
            text: TextSettings {
                content: String::new(),
                font_family: config.font_family.clone(),
                font_size: config.font_size,
            },
        }
    }

    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    pub fn pattern_tile(&self) -> Option<&Arc<PatternTile>> {
        self.pattern_tile.as_ref()
    }

    /// Change the brush colour. Predefined pattern tiles follow it.
    pub fn set_color(&mut self, color: PaintColor) {
        self.color = color;
        if self.pattern != Pattern::Custom {
            self.pattern_tile = self.pattern.tile(color).map(Arc::new);
        }
    }

    pub fn set_size(&mut self, size: f64) {
        self.size = size.clamp(Self::MIN_SIZE, Self::MAX_SIZE);
    }

    /// Select a pattern. `Custom` reuses the last uploaded image and is
    /// ignored until one exists.
    pub fn select_pattern(&mut self, pattern: Pattern) {
        if pattern == Pattern::Custom {
            match &self.custom_tile {
                Some(tile) => {
                    self.pattern = pattern;
                    self.pattern_tile = Some(Arc::clone(tile));
                }
                None => log::debug!("No custom pattern uploaded yet"),
            }
            return;
        }
        self.pattern = pattern;
        self.pattern_tile = pattern.tile(self.color).map(Arc::new);
    }

    /// Use an uploaded image as the pattern tile.
    pub fn set_custom_pattern(&mut self, tile: PatternTile) {
        let tile = Arc::new(tile);
        self.pattern = Pattern::Custom;
        self.pattern_tile = Some(Arc::clone(&tile));
        self.custom_tile = Some(tile);
    }

    /// Resolve the current fill kind to a paint covering `bounds`.
    pub fn resolve_paint(&self, bounds: Rect) -> Paint {
        match self.fill {
            FillKind::Solid => Paint::Solid(self.color),
            FillKind::Gradient => self.gradient.resolve(bounds),
            FillKind::Pattern => match &self.pattern_tile {
                Some(tile) => Paint::Pattern(Arc::clone(tile)),
                None => Paint::Solid(self.color),
            },
        }
    }

    /// Stroke style for freehand brush segments.
    pub fn brush_stroke(&self) -> Stroke {
        let cap = match self.cap {
            BrushCap::Round => Cap::Round,
            BrushCap::Square => Cap::Square,
        };
        Stroke::new(self.size).with_caps(cap).with_join(Join::Round)
    }

    /// Stroke style for outlined shapes and lines.
    pub fn shape_stroke(&self) -> Stroke {
        Stroke::new(self.size).with_caps(Cap::Round).with_join(Join::Round)
    }
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self::from_config(&EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_config() {
        let config = EngineConfig {
            color: PaintColor::rgb(1, 2, 3),
            brush_size: 12.0,
            ..Default::default()
        };
        let settings = BrushSettings::from_config(&config);
        assert_eq!(settings.color, PaintColor::rgb(1, 2, 3));
        assert!((settings.size - 12.0).abs() < f64::EPSILON);
        assert_eq!(settings.text.font_family, config.font_family);
    }

    #[test]
    fn test_size_is_clamped() {
        let mut settings = BrushSettings::default();
        settings.set_size(0.0);
        assert!((settings.size - BrushSettings::MIN_SIZE).abs() < f64::EPSILON);
        settings.set_size(10_000.0);
        assert!((settings.size - BrushSettings::MAX_SIZE).abs() < f64::EPSILON);
    }

    #[test]
    fn test_solid_paint() {
        let mut settings = BrushSettings::default();
        settings.set_color(PaintColor::rgb(9, 9, 9));
        assert_eq!(
            settings.resolve_paint(Rect::new(0.0, 0.0, 1.0, 1.0)),
            Paint::Solid(PaintColor::rgb(9, 9, 9))
        );
    }

    #[test]
    fn test_pattern_follows_color() {
        let mut settings = BrushSettings::default();
        settings.fill = FillKind::Pattern;
        settings.select_pattern(Pattern::Checker);
        settings.set_color(PaintColor::rgb(0, 0, 255));
        let Paint::Pattern(tile) = settings.resolve_paint(Rect::ZERO) else {
            panic!("expected pattern paint");
        };
        assert_eq!(tile.pixel(0, 0), Some(PaintColor::rgb(0, 0, 255)));
    }

    #[test]
    fn test_custom_pattern_survives_color_change() {
        let mut settings = BrushSettings::default();
        settings.fill = FillKind::Pattern;
        let tile = PatternTile::from_rgba8(1, 1, &[10, 20, 30, 255]).unwrap();
        settings.set_custom_pattern(tile.clone());
        settings.set_color(PaintColor::rgb(0, 255, 0));
        assert_eq!(settings.pattern(), Pattern::Custom);
        assert_eq!(settings.pattern_tile().map(|t| t.as_ref()), Some(&tile));
    }

    #[test]
    fn test_custom_ignored_before_upload() {
        let mut settings = BrushSettings::default();
        let stripes = settings.pattern_tile().cloned();
        settings.select_pattern(Pattern::Custom);
        assert_eq!(settings.pattern(), Pattern::Stripes);
        assert_eq!(settings.pattern_tile().cloned(), stripes);
    }

    #[test]
    fn test_custom_restored_after_predefined() {
        let mut settings = BrushSettings::default();
        let tile = PatternTile::from_rgba8(1, 1, &[10, 20, 30, 255]).unwrap();
        settings.set_custom_pattern(tile.clone());
        settings.select_pattern(Pattern::Dots);
        assert_eq!(settings.pattern_tile().map(|t| (t.width(), t.height())), Some((8, 8)));

        settings.select_pattern(Pattern::Custom);
        assert_eq!(settings.pattern(), Pattern::Custom);
        assert_eq!(settings.pattern_tile().map(|t| t.as_ref()), Some(&tile));

        settings.set_color(PaintColor::rgb(0, 255, 0));
        assert_eq!(settings.pattern_tile().map(|t| t.as_ref()), Some(&tile));
    }

    #[test]
    fn test_brush_caps() {
        let mut settings = BrushSettings::default();
        assert_eq!(settings.brush_stroke().start_cap, Cap::Round);
        settings.cap = BrushCap::Square;
        let stroke = settings.brush_stroke();
        assert_eq!(stroke.start_cap, Cap::Square);
        assert_eq!(stroke.end_cap, Cap::Square);
        assert!((stroke.width - settings.size).abs() < f64::EPSILON);
    }
}
