//! Axis-aligned rectangle in world units.

use super::Vec2;

/// Axis-aligned rectangle with a y-up convention: `(x, y)` is the bottom-left
/// corner and `top()` is `y + h`.
///
/// Width and height may be zero or negative while a rectangle is being edited;
/// [`Rect::is_empty`] reports that state and [`Rect::normalized`] fixes it.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    #[inline]
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w, self.h)
    }

    /// Corner diagonally opposite to the origin.
    #[inline]
    pub fn opposite(&self) -> Vec2 {
        Vec2::new(self.x + self.w, self.y + self.h)
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y + self.h
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Returns an equivalent rectangle with non-negative width and height.
    pub fn normalized(&self) -> Self {
        let (x, w) = if self.w < 0.0 {
            (self.x + self.w, -self.w)
        } else {
            (self.x, self.w)
        };
        let (y, h) = if self.h < 0.0 {
            (self.y + self.h, -self.h)
        } else {
            (self.y, self.h)
        };
        Self { x, y, w, h }
    }

    /// Half-open containment test (`x <= p.x < right`), same as pixel rects.
    pub fn contains(&self, p: Vec2) -> bool {
        let r = self.normalized();
        p.x >= r.x && p.x < r.right() && p.y >= r.y && p.y < r.top()
    }

    /// Smallest rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Rect) -> Self {
        let a = self.normalized();
        let b = other.normalized();
        let x = a.x.min(b.x);
        let y = a.y.min(b.y);
        let right = a.right().max(b.right());
        let top = a.top().max(b.top());
        Self::new(x, y, right - x, top - y)
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }
}
