//! Sprite entity: one image placed in the left-to-right layout.

use crate::draw::ImageHandle;
use crate::geometry::{Rect, Vec2};

/// Overlap applied to freshly created sprites.
pub const DEFAULT_OVERLAP: f64 = 0.75;

/// An image in the size chart.
///
/// `y_offset` and `reference_y` are in sprite-local, unscaled units; both are
/// multiplied by `display_scale` when placed in world space.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub image_path: String,
    pub image: ImageHandle,
    pub display_scale: f64,
    /// Fraction of this sprite's rendered width the layout advances past it.
    pub overlap: f64,
    pub y_offset: f64,
    /// Marked baseline used to annotate a measured height.
    pub reference_y: Option<f64>,
    pub name: String,
    /// Set by [`Sprite::place`] during layout.
    pub last_drawn_x: Option<f64>,
}

impl Sprite {
    pub fn new(image: ImageHandle, image_path: impl Into<String>) -> Self {
        Self {
            image_path: image_path.into(),
            image,
            display_scale: 1.0,
            overlap: DEFAULT_OVERLAP,
            y_offset: 0.0,
            reference_y: None,
            name: String::new(),
            last_drawn_x: None,
        }
    }

    /// Rendered size in world pixels (`image size * display_scale`).
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            f64::from(self.image.width()),
            f64::from(self.image.height()),
        ) * self.display_scale
    }

    /// World Y of the sprite's bottom edge.
    pub fn base_y(&self) -> f64 {
        self.display_scale * self.y_offset
    }

    /// Records the layout position and returns where the next sprite starts.
    pub fn place(&mut self, x: f64) -> f64 {
        self.last_drawn_x = Some(x);
        x + self.pixel_size().x * self.overlap
    }

    /// World rectangle at an explicit x position.
    pub fn rect_at(&self, x: f64) -> Rect {
        let size = self.pixel_size();
        Rect::new(x, self.base_y(), size.x, size.y)
    }

    /// World rectangle from the last layout pass, if any.
    pub fn placed_rect(&self) -> Option<Rect> {
        self.last_drawn_x.map(|x| self.rect_at(x))
    }

    pub fn contains(&self, world: Vec2) -> bool {
        self.placed_rect().is_some_and(|rect| rect.contains(world))
    }

    /// World Y of the reference line.
    pub fn reference_height(&self) -> Option<f64> {
        self.reference_y
            .map(|reference| self.display_scale * (reference + self.y_offset))
    }

    /// Height of the reference line above the sprite's own base, in world pixels.
    pub fn reference_baseline(&self) -> Option<f64> {
        self.reference_y.map(|reference| self.display_scale * reference)
    }

    /// Places the reference line at a world Y coordinate.
    pub fn set_reference_from_world(&mut self, world_y: f64) {
        self.reference_y = Some(world_y / self.display_scale - self.y_offset);
    }

    /// Shifts the sprite so its reference line sits on world Y = 0, then drops
    /// the reference. Returns false when no reference is set.
    pub fn zero_on_reference(&mut self) -> bool {
        match self.reference_y.take() {
            Some(reference) => {
                self.y_offset = -reference;
                true
            }
            None => false,
        }
    }

    /// Multiplies the display scale, clamped to the allowed range.
    pub fn scale_by(&mut self, factor: f64) {
        self.display_scale = super::scaled_by(self.display_scale, factor);
    }

    /// Name if set, otherwise the image path.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.image_path
        } else {
            &self.name
        }
    }
}
