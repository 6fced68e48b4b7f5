//! Geometric primitives shared by the table components.
//!
//! All coordinates are page-space with a top-left origin: `y0` is the top
//! edge of a box and `y1` its bottom edge.

/// A rectangle defined by (x0, y0, x1, y1).
pub type Rect = (f64, f64, f64, f64);

/// Trait for anything that occupies an axis-aligned bounding box.
pub trait HasBBox {
    fn x0(&self) -> f64;
    fn y0(&self) -> f64;
    fn x1(&self) -> f64;
    fn y1(&self) -> f64;

    fn width(&self) -> f64 {
        self.x1() - self.x0()
    }

    fn height(&self) -> f64 {
        self.y1() - self.y0()
    }

    fn bbox(&self) -> Rect {
        (self.x0(), self.y0(), self.x1(), self.y1())
    }
}

impl HasBBox for Rect {
    fn x0(&self) -> f64 {
        self.0
    }
    fn y0(&self) -> f64 {
        self.1
    }
    fn x1(&self) -> f64 {
        self.2
    }
    fn y1(&self) -> f64 {
        self.3
    }
}

/// Reorder swapped corners so that `x0 <= x1` and `y0 <= y1`.
pub fn normalize_rect(r: Rect) -> Rect {
    (r.0.min(r.2), r.1.min(r.3), r.0.max(r.2), r.1.max(r.3))
}

/// Area of a rectangle; zero for degenerate or inverted boxes.
pub fn rect_area(r: Rect) -> f64 {
    (r.2 - r.0).max(0.0) * (r.3 - r.1).max(0.0)
}

/// Closed-interval intersection test.
///
/// Boxes that merely touch count as intersecting, so a zero-width stroke
/// lying on a region edge is still considered inside it.
pub fn rects_intersect(a: Rect, b: Rect) -> bool {
    a.0 <= b.2 && b.0 <= a.2 && a.1 <= b.3 && b.1 <= a.3
}

/// Area of the overlap between two rectangles (zero when disjoint).
pub fn overlap_area(a: Rect, b: Rect) -> f64 {
    let width = a.2.min(b.2) - a.0.max(b.0);
    let height = a.3.min(b.3) - a.1.max(b.1);
    if width <= 0.0 || height <= 0.0 {
        0.0
    } else {
        width * height
    }
}

/// Closed containment test for a point.
pub(crate) fn contains_point(r: Rect, x: f64, y: f64) -> bool {
    r.0 <= x && x <= r.2 && r.1 <= y && y <= r.3
}
