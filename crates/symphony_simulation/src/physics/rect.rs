//! Rectangle helpers over `IRect` (min = top-left, y grows downward).

use bevy::prelude::*;

/// Rect from top-left corner and size
pub fn rect_at(x: i32, y: i32, width: i32, height: i32) -> IRect {
    IRect::new(x, y, x + width, y + height)
}

/// Rect of `size` whose center is `center` (top-left = center - size / 2)
pub fn centered_rect(center: IVec2, size: IVec2) -> IRect {
    let min = center - size / 2;
    IRect::from_corners(min, min + size)
}

pub fn translated(rect: IRect, dx: i32, dy: i32) -> IRect {
    let offset = IVec2::new(dx, dy);
    IRect::from_corners(rect.min + offset, rect.max + offset)
}

/// Strict overlap: shared edges do not count, empty rects never overlap
pub fn overlaps(a: IRect, b: IRect) -> bool {
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.min.x < b.max.x && b.min.x < a.max.x && a.min.y < b.max.y && b.min.y < a.max.y
}

/// Half-open point test: left/top edges inside, right/bottom edges outside
pub fn contains_point(rect: IRect, point: Vec2) -> bool {
    point.x >= rect.min.x as f32
        && point.x < rect.max.x as f32
        && point.y >= rect.min.y as f32
        && point.y < rect.max.y as f32
}

/// Integer center (top-left + half size, floored)
pub fn center_of(rect: IRect) -> IVec2 {
    rect.min + rect.size() / 2
}
