//! World-space geometry primitives shared by the scene, view and codec layers.

pub mod rect;
pub mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
