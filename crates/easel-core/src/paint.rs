//! Fill styles: solid colours, gradients and repeating patterns.

use crate::color::PaintColor;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A resolved fill style, ready to hand to a [`Surface`](crate::Surface).
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(PaintColor),
    LinearGradient {
        start: Point,
        end: Point,
        stops: Vec<GradientStop>,
    },
    RadialGradient {
        center: Point,
        radius: f64,
        stops: Vec<GradientStop>,
    },
    /// Tile repeated from the surface origin.
    Pattern(Arc<PatternTile>),
}

/// A colour at a position along a gradient, `offset` in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f32,
    pub color: PaintColor,
}

/// How the brush colour is applied to strokes and shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillKind {
    #[default]
    Solid,
    Gradient,
    Pattern,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

/// Axis of a linear gradient across the bounds of the painted operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GradientDirection {
    #[default]
    Horizontal,
    Vertical,
    Diagonal,
}

/// Gradient options picked by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientSettings {
    pub kind: GradientKind,
    pub direction: GradientDirection,
    /// Colour stops, spread evenly from start to end.
    pub colors: Vec<PaintColor>,
}

impl Default for GradientSettings {
    fn default() -> Self {
        Self {
            kind: GradientKind::default(),
            direction: GradientDirection::default(),
            colors: vec![PaintColor::BLACK, PaintColor::WHITE],
        }
    }
}

impl GradientSettings {
    /// Evenly spaced stops for the configured colours.
    pub fn stops(&self) -> Vec<GradientStop> {
        let last = self.colors.len().saturating_sub(1).max(1) as f32;
        self.colors
            .iter()
            .enumerate()
            .map(|(i, &color)| GradientStop {
                offset: i as f32 / last,
                color,
            })
            .collect()
    }

    /// Build the gradient paint spanning `bounds`.
    ///
    /// A single colour degenerates to a solid fill.
    pub fn resolve(&self, bounds: Rect) -> Paint {
        match self.colors.as_slice() {
            [] => return Paint::Solid(PaintColor::BLACK),
            [only] => return Paint::Solid(*only),
            _ => {}
        }

        let stops = self.stops();
        match self.kind {
            GradientKind::Linear => {
                let (start, end) = match self.direction {
                    GradientDirection::Horizontal => {
                        let y = bounds.center().y;
                        (Point::new(bounds.x0, y), Point::new(bounds.x1, y))
                    }
                    GradientDirection::Vertical => {
                        let x = bounds.center().x;
                        (Point::new(x, bounds.y0), Point::new(x, bounds.y1))
                    }
                    GradientDirection::Diagonal => {
                        (Point::new(bounds.x0, bounds.y0), Point::new(bounds.x1, bounds.y1))
                    }
                };
                Paint::LinearGradient { start, end, stops }
            }
            GradientKind::Radial => Paint::RadialGradient {
                center: bounds.center(),
                radius: (bounds.width().max(bounds.height()) / 2.0).max(1.0),
                stops,
            },
        }
    }
}

/// A small RGBA8 image repeated across a fill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternTile {
    width: u32,
    height: u32,
    /// Row-major straight-alpha pixels.
    pixels: Vec<PaintColor>,
}

impl PatternTile {
    /// Create a transparent tile. Returns `None` for an empty size.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels: vec![PaintColor::TRANSPARENT; (width * height) as usize],
        })
    }

    /// Build a tile from row-major RGBA8 bytes.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Option<Self> {
        if width == 0 || height == 0 || bytes.len() != (width * height * 4) as usize {
            return None;
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|px| PaintColor::new(px[0], px[1], px[2], px[3]))
            .collect();
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[PaintColor] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<PaintColor> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }

    fn set(&mut self, x: u32, y: u32, color: PaintColor) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = color;
        }
    }

    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: PaintColor) {
        for yy in y..(y + h).min(self.height) {
            for xx in x..(x + w).min(self.width) {
                self.set(xx, yy, color);
            }
        }
    }
}

/// Pattern selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Pattern {
    #[default]
    Stripes,
    Dots,
    Checker,
    /// Image supplied through [`Command::SetCustomPattern`](crate::Command::SetCustomPattern).
    Custom,
}

impl Pattern {
    /// Render a predefined pattern in `color`. `Custom` has no built-in tile.
    pub fn tile(self, color: PaintColor) -> Option<PatternTile> {
        match self {
            Pattern::Stripes => {
                let mut tile = PatternTile::new(10, 10)?;
                // One-pixel stripes with one-pixel gaps.
                for x in (0..10).step_by(2) {
                    tile.fill_rect(x, 0, 1, 10, color);
                }
                Some(tile)
            }
            Pattern::Dots => {
                let mut tile = PatternTile::new(8, 8)?;
                // Disc of radius 3 centred in the tile, sampled at pixel centres.
                for y in 0..8u32 {
                    for x in 0..8u32 {
                        let dx = x as f64 + 0.5 - 4.0;
                        let dy = y as f64 + 0.5 - 4.0;
                        if dx * dx + dy * dy <= 9.0 {
                            tile.set(x, y, color);
                        }
                    }
                }
                Some(tile)
            }
            Pattern::Checker => {
                let mut tile = PatternTile::new(10, 10)?;
                tile.fill_rect(0, 0, 5, 5, color);
                tile.fill_rect(5, 5, 5, 5, color);
                Some(tile)
            }
            Pattern::Custom => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> PaintColor {
        PaintColor::rgb(255, 0, 0)
    }

    #[test]
    fn test_stops_are_evenly_spaced() {
        let settings = GradientSettings {
            colors: vec![PaintColor::BLACK, red(), PaintColor::WHITE],
            ..Default::default()
        };
        let offsets: Vec<f32> = settings.stops().iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_horizontal_gradient_spans_bounds() {
        let settings = GradientSettings::default();
        let paint = settings.resolve(Rect::new(10.0, 20.0, 110.0, 60.0));
        match paint {
            Paint::LinearGradient { start, end, stops } => {
                assert_eq!(start, Point::new(10.0, 40.0));
                assert_eq!(end, Point::new(110.0, 40.0));
                assert_eq!(stops.len(), 2);
            }
            other => panic!("expected linear gradient, got {other:?}"),
        }
    }

    #[test]
    fn test_vertical_and_diagonal_gradients() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        let mut settings = GradientSettings {
            direction: GradientDirection::Vertical,
            ..Default::default()
        };
        let Paint::LinearGradient { start, end, .. } = settings.resolve(bounds) else {
            panic!("expected linear gradient");
        };
        assert_eq!((start, end), (Point::new(50.0, 0.0), Point::new(50.0, 50.0)));

        settings.direction = GradientDirection::Diagonal;
        let Paint::LinearGradient { start, end, .. } = settings.resolve(bounds) else {
            panic!("expected linear gradient");
        };
        assert_eq!((start, end), (Point::new(0.0, 0.0), Point::new(100.0, 50.0)));
    }

    #[test]
    fn test_radial_gradient_uses_larger_half_extent() {
        let settings = GradientSettings {
            kind: GradientKind::Radial,
            ..Default::default()
        };
        let Paint::RadialGradient { center, radius, .. } = settings.resolve(Rect::new(0.0, 0.0, 80.0, 40.0)) else {
            panic!("expected radial gradient");
        };
        assert_eq!(center, Point::new(40.0, 20.0));
        assert!((radius - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_single_stop_is_solid() {
        let settings = GradientSettings {
            colors: vec![red()],
            ..Default::default()
        };
        assert_eq!(settings.resolve(Rect::new(0.0, 0.0, 1.0, 1.0)), Paint::Solid(red()));
    }

    #[test]
    fn test_stripes_tile() {
        let tile = Pattern::Stripes.tile(red()).unwrap();
        assert_eq!((tile.width(), tile.height()), (10, 10));
        assert_eq!(tile.pixel(0, 3), Some(red()));
        assert_eq!(tile.pixel(1, 3), Some(PaintColor::TRANSPARENT));
        assert_eq!(tile.pixel(10, 0), None);
    }

    #[test]
    fn test_dots_tile() {
        let tile = Pattern::Dots.tile(red()).unwrap();
        assert_eq!((tile.width(), tile.height()), (8, 8));
        assert_eq!(tile.pixel(4, 4), Some(red()));
        assert_eq!(tile.pixel(0, 0), Some(PaintColor::TRANSPARENT));
    }

    #[test]
    fn test_checker_tile() {
        let tile = Pattern::Checker.tile(red()).unwrap();
        assert_eq!(tile.pixel(2, 2), Some(red()));
        assert_eq!(tile.pixel(7, 7), Some(red()));
        assert_eq!(tile.pixel(7, 2), Some(PaintColor::TRANSPARENT));
        assert!(Pattern::Custom.tile(red()).is_none());
    }

    #[test]
    fn test_tile_from_rgba8_checks_length() {
        assert!(PatternTile::from_rgba8(2, 2, &[0; 15]).is_none());
        let tile = PatternTile::from_rgba8(1, 1, &[1, 2, 3, 4]).unwrap();
        assert_eq!(tile.pixel(0, 0), Some(PaintColor::new(1, 2, 3, 4)));
    }
}
