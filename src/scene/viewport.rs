//! Named capture regions exported as independently scaled images.

use crate::geometry::{Rect, Vec2};

/// Rectangular capture region in world pixel units.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub name: String,
    pub rect: Rect,
    /// Resolution multiplier applied on export.
    pub render_scale: f64,
}

impl Viewport {
    pub fn new(name: impl Into<String>, rect: Rect, render_scale: f64) -> Self {
        Self {
            name: name.into(),
            rect,
            render_scale,
        }
    }

    /// Zero-area region anchored at `origin`, used while the user drags it out.
    pub fn provisional(origin: Vec2) -> Self {
        Self::new(String::new(), Rect::new(origin.x, origin.y, 0.0, 0.0), 1.0)
    }

    pub fn scale_by(&mut self, factor: f64) {
        self.render_scale = super::scaled_by(self.render_scale, factor);
    }

    /// Invalid viewports are drawn distinctly and skipped by export.
    pub fn is_invalid(&self) -> bool {
        self.rect.is_empty()
    }

    /// Output size in pixels.
    pub fn render_size(&self) -> Vec2 {
        self.rect.size() * self.render_scale
    }

    pub fn contains(&self, world: Vec2) -> bool {
        self.rect.contains(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_size_scales_rect() {
        let vp = Viewport::new("head", Rect::new(0.0, 0.0, 100.0, 50.0), 2.5);
        assert_eq!(vp.render_size(), Vec2::new(250.0, 125.0));
        assert!(!vp.is_invalid());
    }

    #[test]
    fn zero_or_negative_extent_is_invalid() {
        assert!(Viewport::provisional(Vec2::new(3.0, 4.0)).is_invalid());
        let vp = Viewport::new("", Rect::new(0.0, 0.0, 10.0, -1.0), 1.0);
        assert!(vp.is_invalid());
    }
}
