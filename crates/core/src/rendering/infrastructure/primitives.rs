use ndarray::{s, Axis};

use crate::shared::bounding_box::BoundingBox;
use crate::shared::frame::Frame;

/// Sets every pixel of `area` (clipped to the frame) to `color`.
pub fn fill_rect(frame: &mut Frame, area: &BoundingBox, color: [u8; 3]) {
    let Some((rows, cols)) = clip(frame, area) else {
        return;
    };
    let mut pixels = frame.as_ndarray_mut();
    let mut roi = pixels.slice_mut(s![rows.0..rows.1, cols.0..cols.1, ..]);
    for mut px in roi.lanes_mut(Axis(2)) {
        for (c, v) in px.iter_mut().enumerate() {
            *v = color[c];
        }
    }
}

/// Blends `color` over `area` with the given opacity:
/// `out = opacity * color + (1 - opacity) * in`.
pub fn blend_rect(frame: &mut Frame, area: &BoundingBox, color: [u8; 3], opacity: f64) {
    let Some((rows, cols)) = clip(frame, area) else {
        return;
    };
    let opacity = opacity.clamp(0.0, 1.0);
    let mut pixels = frame.as_ndarray_mut();
    let mut roi = pixels.slice_mut(s![rows.0..rows.1, cols.0..cols.1, ..]);
    for mut px in roi.lanes_mut(Axis(2)) {
        for (c, v) in px.iter_mut().enumerate() {
            let mixed = opacity * color[c] as f64 + (1.0 - opacity) * *v as f64;
            *v = mixed.round().clamp(0.0, 255.0) as u8;
        }
    }
}

/// Unfilled outline spanning `(x, y)` to `(x + width, y + height)`
/// inclusive, with the stroke growing inward.
pub fn draw_rect_outline(frame: &mut Frame, rect: &BoundingBox, color: [u8; 3], thickness: i32) {
    if rect.width < 0 || rect.height < 0 || thickness < 1 {
        return;
    }
    let outer = BoundingBox::new(rect.x, rect.y, rect.width + 1, rect.height + 1);
    let t = thickness;
    let bands = [
        BoundingBox::new(outer.x, outer.y, outer.width, t),
        BoundingBox::new(outer.x, outer.bottom() - t, outer.width, t),
        BoundingBox::new(outer.x, outer.y, t, outer.height),
        BoundingBox::new(outer.right() - t, outer.y, t, outer.height),
    ];
    for band in bands {
        fill_rect(frame, &band.clamped_to(&outer), color);
    }
}

/// Row and column ranges of `area` inside the frame, or `None` if nothing
/// of it is visible.
fn clip(frame: &Frame, area: &BoundingBox) -> Option<((usize, usize), (usize, usize))> {
    let visible = area.clamped_to(&frame.bounds());
    if visible.is_empty() {
        return None;
    }
    Some((
        (visible.y as usize, visible.bottom() as usize),
        (visible.x as usize, visible.right() as usize),
    ))
}
