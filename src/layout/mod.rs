pub mod floating;

use ratatui::prelude::Rect;

use crate::window::FloatRect;

pub fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// Clamp `rect` so that at least `margin` columns and rows stay inside
/// `bounds`. Size is kept; only the origin moves.
pub fn keep_visible(rect: FloatRect, bounds: Rect, margin: u16) -> FloatRect {
    if bounds.width == 0 || bounds.height == 0 {
        return rect;
    }
    let margin_x = i32::from(margin.min(rect.width).min(bounds.width));
    let margin_y = i32::from(margin.min(rect.height).min(bounds.height));
    let min_x = i32::from(bounds.x) - i32::from(rect.width) + margin_x;
    let max_x = i32::from(bounds.x) + i32::from(bounds.width) - margin_x;
    // The header row must stay reachable, so the top edge never leaves the
    // bounds upward.
    let min_y = i32::from(bounds.y);
    let max_y = i32::from(bounds.y) + i32::from(bounds.height) - margin_y;
    FloatRect {
        x: rect.x.clamp(min_x, max_x.max(min_x)),
        y: rect.y.clamp(min_y, max_y.max(min_y)),
        ..rect
    }
}
