#![forbid(unsafe_code)]

//! Geometric primitives.

/// A rectangle for layout bounds and hit testing.
///
/// Uses cell coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Whether the rectangle covers no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Row offset of `y` from the top edge, if `y` falls inside the rectangle's rows.
    #[inline]
    pub const fn row_of(&self, y: u16) -> Option<u16> {
        if y >= self.y && y < self.bottom() {
            Some(y - self.y)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(r.contains(2, 3));
        assert!(r.contains(5, 4));
        assert!(!r.contains(6, 4));
        assert!(!r.contains(5, 5));
        assert!(!r.contains(1, 3));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let r = Rect::new(0, 0, 0, 5);
        assert!(r.is_empty());
        assert!(!r.contains(0, 0));
    }

    #[test]
    fn edges_saturate() {
        let r = Rect::new(u16::MAX - 1, 0, 10, 1);
        assert_eq!(r.right(), u16::MAX);
    }

    #[test]
    fn row_of_reports_offset() {
        let r = Rect::new(0, 10, 5, 3);
        assert_eq!(r.row_of(10), Some(0));
        assert_eq!(r.row_of(12), Some(2));
        assert_eq!(r.row_of(13), None);
        assert_eq!(r.row_of(9), None);
    }

    proptest! {
        #[test]
        fn contains_implies_row_of(x in 0u16..200, y in 0u16..200, w in 0u16..50, h in 0u16..50, px in 0u16..260, py in 0u16..260) {
            let r = Rect::new(x, y, w, h);
            if r.contains(px, py) {
                prop_assert!(r.row_of(py).is_some());
                prop_assert!(!r.is_empty());
            }
        }
    }
}
