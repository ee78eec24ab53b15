//! Text placement, dragging and commit.

use super::Interaction;
use crate::canvas::Canvas;
use crate::color::PaintColor;
use crate::surface::Surface;
use crate::text::{TextId, TextItem};
use kurbo::{Point, Vec2};

/// Grab an existing pending item under the pointer, or place a new one.
pub(crate) fn pointer_down<S: Surface>(canvas: &mut Canvas<S>, point: Point) -> Interaction {
    let overlay = &canvas.overlay;
    let hit = canvas
        .text_items
        .hit_test(point, |item| overlay.measure_text(&item.content, &item.font_family, item.font_size));
    if let Some((id, grab)) = hit {
        return Interaction::DraggingText { id, grab };
    }

    let text = &canvas.settings.text;
    if text.content.trim().is_empty() {
        log::debug!("No text to place");
        return Interaction::Idle;
    }

    let item = TextItem::new(
        point,
        text.content.clone(),
        text.font_family.clone(),
        text.font_size,
        canvas.settings.color,
    );
    canvas.text_items.push(item);
    canvas.redraw_overlay();
    Interaction::Idle
}

/// Move the dragged item so the grab point follows the pointer.
pub(crate) fn drag<S: Surface>(canvas: &mut Canvas<S>, id: TextId, grab: Vec2, point: Point) {
    if canvas.text_items.move_to(id, point - grab) {
        canvas.redraw_overlay();
    }
}

/// Rasterize every pending item onto the main surface and record it.
/// Returns whether anything was committed.
pub(crate) fn commit<S: Surface>(canvas: &mut Canvas<S>) -> bool {
    if canvas.text_items.is_empty() {
        return false;
    }
    let items = canvas.text_items.take_all();
    for item in &items {
        canvas.surface.fill_text(item);
    }
    canvas.overlay.clear(PaintColor::TRANSPARENT);
    canvas.save_state();
    log::debug!("Committed {} text item(s)", items.len());
    true
}
