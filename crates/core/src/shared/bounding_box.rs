/// Axis-aligned integer rectangle in pixel coordinates.
///
/// Boxes carry no identity across frames; each detection pass produces a
/// fresh set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Multiplies origin and size by per-axis factors, rounding to the
    /// nearest pixel. Horizontal fields use `fx`, vertical fields use `fy`.
    pub fn scaled_xy(&self, fx: f64, fy: f64) -> Self {
        let s = |v: i32, f: f64| (v as f64 * f).round() as i32;
        Self::new(
            s(self.x, fx),
            s(self.y, fy),
            s(self.width, fx),
            s(self.height, fy),
        )
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Intersection with `outer`. Disjoint boxes collapse to zero size at
    /// the nearest edge of `outer`.
    pub fn clamped_to(&self, outer: &BoundingBox) -> Self {
        let x0 = self.x.clamp(outer.x, outer.right());
        let y0 = self.y.clamp(outer.y, outer.bottom());
        let x1 = self.right().clamp(outer.x, outer.right());
        let y1 = self.bottom().clamp(outer.y, outer.bottom());
        Self::new(x0, y0, (x1 - x0).max(0), (y1 - y0).max(0))
    }

    pub fn contains(&self, inner: &BoundingBox) -> bool {
        inner.x >= self.x
            && inner.y >= self.y
            && inner.right() <= self.right()
            && inner.bottom() <= self.bottom()
    }
}
