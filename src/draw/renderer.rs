//! Drawing seam between scene composition and a concrete backend.

use super::{Color, ImageHandle};
use crate::geometry::{Rect, Vec2};

/// Which point of the text's bounding box sits on the requested position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    BottomLeft,
    TopLeft,
    TopRight,
    BottomRight,
    Center,
}

impl TextAnchor {
    /// Bottom-left corner of a box of `size` anchored at `position` (y-up).
    pub fn origin_for(self, position: Vec2, size: Vec2) -> Vec2 {
        match self {
            TextAnchor::BottomLeft => position,
            TextAnchor::TopLeft => Vec2::new(position.x, position.y - size.y),
            TextAnchor::TopRight => position - size,
            TextAnchor::BottomRight => Vec2::new(position.x - size.x, position.y),
            TextAnchor::Center => position - size / 2.0,
        }
    }
}

/// Primitive drawing operations in device coordinates (pixels, y-up).
pub trait Renderer {
    /// Surface size in device pixels.
    fn size(&self) -> Vec2;

    /// Fills the whole surface.
    fn clear(&mut self, color: Color);

    /// Draws `image` with its bottom-left corner at `position`, scaled by `scale`.
    fn draw_image(&mut self, image: &ImageHandle, position: Vec2, scale: f64);

    fn draw_line(&mut self, a: Vec2, b: Vec2, color: Color, width: f64);

    fn draw_rect(&mut self, rect: Rect, color: Color, filled: bool);

    fn draw_text(&mut self, text: &str, position: Vec2, color: Color, anchor: TextAnchor);

    /// Rendered size of `text` in device pixels.
    fn measure_text(&self, text: &str) -> Vec2;
}
