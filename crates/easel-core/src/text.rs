//! Pending text items shown on the overlay until committed.

use crate::color::PaintColor;
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for pending text items.
pub type TextId = Uuid;

/// A piece of text that has been placed but not yet rasterized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub id: TextId,
    /// Left end of the alphabetic baseline, in surface coordinates.
    pub position: Point,
    pub content: String,
    pub font_family: String,
    /// Font size in pixels.
    pub font_size: f64,
    pub color: PaintColor,
}

impl TextItem {
    pub fn new(position: Point, content: impl Into<String>, font_family: impl Into<String>, font_size: f64, color: PaintColor) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            content: content.into(),
            font_family: font_family.into(),
            font_size,
            color,
        }
    }

    /// Bounding box for hit testing, given the measured advance width.
    ///
    /// Spans one font size above the baseline and a fifth below it for
    /// descenders.
    pub fn bounds(&self, width: f64) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y - self.font_size,
            self.position.x + width.max(0.0),
            self.position.y + self.font_size * 0.2,
        )
    }
}

/// Ordered list of pending text items (back to front).
#[derive(Debug, Clone, Default)]
pub struct TextItems {
    items: Vec<TextItem>,
}

impl TextItems {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: TextItem) -> TextId {
        let id = item.id;
        self.items.push(item);
        id
    }

    pub fn get(&self, id: TextId) -> Option<&TextItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Move an item so its baseline origin sits at `position`.
    pub fn move_to(&mut self, id: TextId, position: Point) -> bool {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(item) => {
                item.position = position;
                true
            }
            None => false,
        }
    }

    /// Topmost item under `point`, with the offset from its origin.
    ///
    /// `measure` returns the advance width of an item's content.
    pub fn hit_test(&self, point: Point, mut measure: impl FnMut(&TextItem) -> f64) -> Option<(TextId, Vec2)> {
        self.items
            .iter()
            .rev()
            .find(|item| item.bounds(measure(item)).contains(point))
            .map(|item| (item.id, point - item.position))
    }

    pub fn iter(&self) -> impl Iterator<Item = &TextItem> {
        self.items.iter()
    }

    /// Remove and return every item, in placement order.
    pub fn take_all(&mut self) -> Vec<TextItem> {
        std::mem::take(&mut self.items)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
